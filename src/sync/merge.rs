//! Field and label precedence for deployment records.
//!
//! For every overridable field the remote existing value wins, then the
//! override mapping value, then a hardcoded default. Every merge builds a
//! new vector so records never alias a shared label collection.

/// Resolve one overridable field.
pub fn resolve_field(remote: Option<&str>, mapped: Option<&str>, fallback: &str) -> String {
    remote.or(mapped).unwrap_or(fallback).to_string()
}

/// Merge label sets.
///
/// Mapping labels (when present and non-empty) are concatenated with the
/// caller-supplied labels; remote existing labels come first and absorb
/// the concatenation.
pub fn merge_labels(remote: &[String], mapped: Option<&[String]>, caller: &[String]) -> Vec<String> {
    let to_add: Vec<String> = match mapped {
        Some(mapped) if !mapped.is_empty() => mapped.iter().chain(caller).cloned().collect(),
        _ => caller.to_vec(),
    };

    if remote.is_empty() {
        to_add
    } else {
        remote.iter().cloned().chain(to_add).collect()
    }
}
