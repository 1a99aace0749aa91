//! Email address extraction and display-name synthesis.
//!
//! Source headers carry addresses either bare (`jane.doe@enron.com`) or in
//! display form (`Jane Doe <jane.doe@enron.com>`). Everything downstream
//! (frequency counting, persona lookup, thread keys) works on the extracted
//! lowercase bare address so a correspondent maps to the same persona no
//! matter how the header was written.

/// Extracts the bare lowercase address from a header fragment.
///
/// Returns `None` when the fragment carries no address at all (the source
/// sometimes leaves directory-service display strings with no `@`).
#[must_use]
pub fn extract_address(raw: &str) -> Option<String> {
    if let Some(start) = raw.find('<') {
        if let Some(len) = raw[start + 1..].find('>') {
            let inner = &raw[start + 1..start + 1 + len];
            return Some(inner.trim().to_lowercase());
        }
    }
    if raw.contains('@') {
        return Some(raw.trim().to_lowercase());
    }
    None
}

/// Domain part of a bare address, if any.
#[must_use]
pub fn domain(address: &str) -> Option<&str> {
    address.split_once('@').map(|(_, d)| d)
}

/// Synthesizes a display name from an address local part:
/// dots/underscores/hyphens become spaces, words are title-cased.
///
/// `jane.doe@example.com` -> `Jane Doe`. Empty input yields `Unknown`.
#[must_use]
pub fn display_name(address: &str) -> String {
    let local = address.split('@').next().unwrap_or_default();
    let spaced: String = local
        .chars()
        .map(|ch| if matches!(ch, '.' | '_' | '-') { ' ' } else { ch })
        .collect();
    let name = title_case(&spaced);
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name
    }
}

/// Local part for a synthesized address: the display name, lowercased,
/// words joined with dots. `Jane Doe` -> `jane.doe`.
#[must_use]
pub fn local_part(display: &str) -> String {
    display
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(".")
}

/// Display name for a service address, derived from the first domain label:
/// `notifications@github.com` -> `Github`.
#[must_use]
pub fn service_name(address: &str) -> String {
    let label = domain(address)
        .and_then(|d| d.split('.').next())
        .unwrap_or(address);
    title_case(label)
}

/// Uppercases the first letter of each whitespace-separated word.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
