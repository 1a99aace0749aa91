//! Persona assignment: frequency-ranked identity re-mapping.
//!
//! Every distinct correspondent address (excluding the owner) is counted
//! across all records, ranked, and bound to the fixed roster in rank order.
//! The mapping is a pure function of the input set and the roster: ties are
//! broken by ascending lexical address order, so re-running on identical
//! input yields an identical mapping.

use std::collections::{BTreeMap, HashMap};

use mailforge_core::{Config, Persona, RawRecord, addr};

/// Role tag for addresses beyond the roster.
const ROLE_ACQUAINTANCE: &str = "acquaintance";
/// Role tag for well-known automated addresses.
const ROLE_SERVICE: &str = "service";

/// Builds the address -> persona map for a run.
///
/// Counting covers the sender and every to/cc/bcc entry of every record;
/// an address appearing as both sender and recipient on one record counts
/// once per occurrence. Addresses containing the owner fragment are never
/// mapped; the owner becomes the fixed primary identity elsewhere.
#[must_use]
pub fn build_persona_map(
    cfg: &Config,
    records: &[RawRecord],
    owner_fragment: &str,
) -> BTreeMap<String, Persona> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut bump = |raw: &str| {
        if let Some(address) = addr::extract_address(raw) {
            if !address.contains(owner_fragment) {
                *counts.entry(address).or_insert(0) += 1;
            }
        }
    };

    for record in records {
        bump(&record.from);
        for list in [&record.to, &record.cc, &record.bcc] {
            for entry in list {
                bump(entry);
            }
        }
    }

    let mut contacts: Vec<(String, usize)> = counts.into_iter().collect();
    contacts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut map = BTreeMap::new();
    for (rank, (address, _count)) in contacts.iter().enumerate() {
        let persona = cfg.persona_roster.get(rank).cloned().unwrap_or_else(|| Persona {
            name: addr::display_name(address),
            email: format!("contact{rank}@{}", cfg.placeholder_domain),
            role: ROLE_ACQUAINTANCE.to_string(),
            company: None,
        });
        map.insert(address.clone(), persona);
    }

    // Known automated senders get fixed service personas, overriding the
    // generic assignment for those exact addresses. Only addresses that
    // actually occur in the corpus enter the map.
    for service in &cfg.service_addresses {
        if let Some(entry) = map.get_mut(service) {
            *entry = Persona {
                name: addr::service_name(service),
                email: service.clone(),
                role: ROLE_SERVICE.to_string(),
                company: None,
            };
        }
    }

    map
}
