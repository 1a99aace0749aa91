//! Run configuration for mailforge.
//!
//! A [`Config`] is owned by the caller and passed by reference to the
//! pipeline; no ambient globals, so independent runs (and tests) never
//! interfere. Every heuristic table is an injectable field with production
//! defaults, so tests can substitute minimal fixtures without depending on
//! the production keyword set.

use chrono::{DateTime, Months, TimeZone, Utc};

use crate::models::Persona;

/// Default owner sub-directory under the source root.
pub const DEFAULT_OWNER: &str = "kaminski-v";
/// Default record limit per run.
pub const DEFAULT_LIMIT: usize = 5000;
/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./test-data";
/// Default primary output identity.
pub const DEFAULT_PRIMARY_ADDRESS: &str = "test@example.com";

/// Keyword tables driving label inference.
///
/// All matching is lowercase substring containment.
#[derive(Debug, Clone)]
pub struct LabelRules {
    /// Subject / body-prefix keywords marking a message IMPORTANT.
    pub important_keywords: Vec<String>,
    /// Sender-address fragments marking a message IMPORTANT.
    pub important_sender_fragments: Vec<String>,
    /// Subject+body keywords marking a message promotional.
    pub promotional_keywords: Vec<String>,
    /// Sender-address fragments marking a message as automated updates.
    pub automated_sender_fragments: Vec<String>,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            important_keywords: to_strings(&[
                "urgent",
                "asap",
                "important",
                "critical",
                "action required",
                "deadline",
                "immediate",
                "confidential",
                "board meeting",
                "executive",
            ]),
            important_sender_fragments: to_strings(&["gibner", "buy", "lay"]),
            promotional_keywords: to_strings(&[
                "unsubscribe",
                "click here",
                "special offer",
                "deal",
                "discount",
                "sale",
                "free shipping",
                "act now",
                "limited time",
            ]),
            automated_sender_fragments: to_strings(&[
                "no-reply",
                "noreply",
                "donotreply",
                "notification",
                "alert",
                "system",
                "automated",
                "mailman",
                "listserv",
            ]),
        }
    }
}

/// Full run configuration.
///
/// # Determinism
/// `base_date` and `date_fallback` are captured once at construction.
/// Re-running with the same `Config` over identical input yields
/// byte-identical artifacts; tests inject fixed instants for both.
#[derive(Debug, Clone)]
pub struct Config {
    /// Organization name substituted out of bodies.
    pub source_org_name: String,
    /// Neutral replacement organization name.
    pub placeholder_org_name: String,
    /// Domain treated as the source organization's own.
    pub source_org_domain: String,
    /// Neutral placeholder domain for synthesized addresses.
    pub placeholder_domain: String,
    /// Domain used in synthesized `Message-ID` headers.
    pub message_id_domain: String,

    /// Target corpus base instant. The global time shift is
    /// `base_date - source_epoch`.
    pub base_date: DateTime<Utc>,
    /// Start of the source corpus epoch.
    pub source_epoch: DateTime<Utc>,
    /// Substituted for unparseable dates; recorded once per run.
    pub date_fallback: DateTime<Utc>,

    /// Scan folders in priority order; the corpus is biased toward these.
    pub priority_folders: Vec<String>,
    /// Catch-all folder scanned last, numeric-named files only.
    pub catchall_folder: String,

    /// Fixed ordered persona roster for the top-ranked correspondents.
    pub persona_roster: Vec<Persona>,
    /// Automated addresses that always receive fixed service personas.
    pub service_addresses: Vec<String>,

    pub label_rules: LabelRules,
}

impl Default for Config {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            source_org_name: "Enron".to_string(),
            placeholder_org_name: "TechCorp".to_string(),
            source_org_domain: "enron.com".to_string(),
            placeholder_domain: "example.com".to_string(),
            message_id_domain: "mail.gmail.com".to_string(),
            base_date: now.checked_sub_months(Months::new(36)).unwrap_or(now),
            source_epoch: Utc
                .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or(DateTime::UNIX_EPOCH),
            date_fallback: now,
            priority_folders: to_strings(&[
                "sent_items",
                "inbox",
                "discussion_threads",
                "personal",
            ]),
            catchall_folder: "all_documents".to_string(),
            persona_roster: default_roster(),
            service_addresses: to_strings(&[
                "notifications@github.com",
                "no-reply@linkedin.com",
                "united@united.com",
                "alerts@mint.com",
            ]),
            label_rules: LabelRules::default(),
        }
    }
}

impl Config {
    /// The constant offset applied to every timestamp in the run.
    #[must_use]
    pub fn time_shift(&self) -> chrono::Duration {
        self.base_date - self.source_epoch
    }
}

fn default_roster() -> Vec<Persona> {
    vec![
        Persona::new("Sarah Chen", "sarah.chen@gmail.com", "sister", None),
        Persona::new("David Kumar", "david.kumar@techcorp.com", "manager", Some("TechCorp")),
        Persona::new("Alex Rivera", "alex.r@gmail.com", "best friend", None),
        Persona::new("Lisa Thompson", "lisa.t@techcorp.com", "colleague", Some("TechCorp")),
        Persona::new("Mom", "mom.wilson@yahoo.com", "family", None),
        Persona::new("Jamie Park", "jamiepark92@gmail.com", "friend", None),
        Persona::new("Michael Chen", "m.chen@techcorp.com", "colleague", Some("TechCorp")),
        Persona::new("Emma Davis", "emma.davis@gmail.com", "friend", None),
        Persona::new("Robert Johnson", "rjohnson@partnerco.com", "client", Some("PartnerCo")),
        Persona::new("Jessica Lee", "jlee@techcorp.com", "colleague", Some("TechCorp")),
    ]
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_shift_preserves_relative_chronology() {
        let cfg = Config {
            base_date: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            source_epoch: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            ..Config::default()
        };
        let shift = cfg.time_shift();

        let a = Utc.with_ymd_and_hms(2001, 3, 5, 10, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2001, 3, 5, 11, 30, 0).unwrap();
        assert_eq!((b + shift) - (a + shift), b - a);
    }

    #[test]
    fn default_roster_is_fixed_and_ordered() {
        let cfg = Config::default();
        assert_eq!(cfg.persona_roster.len(), 10);
        assert_eq!(cfg.persona_roster[0].name, "Sarah Chen");
        assert_eq!(cfg.persona_roster[9].name, "Jessica Lee");
    }

    #[test]
    fn priority_folders_precede_catchall() {
        let cfg = Config::default();
        assert_eq!(
            cfg.priority_folders,
            vec!["sent_items", "inbox", "discussion_threads", "personal"]
        );
        assert_eq!(cfg.catchall_folder, "all_documents");
    }
}
