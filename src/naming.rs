//! Code and name normalization helpers.
//!
//! bSDD encodes an IFC entity together with its predefined type in one
//! combined code string (e.g. `IfcWallSTANDARD` is `IfcWall` + `STANDARD`).
//! These helpers split such codes and derive filename/identifier-safe codes
//! from free-text display names.

use std::collections::BTreeSet;

/// Derive a stable code from a human-readable name.
///
/// Spaces are stripped and any character outside `[A-Za-z0-9_-]` is dropped.
pub fn code_from_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Split a combined bSDD entity code into `(entity_code, predefined_suffix)`.
///
/// The split point is the last uppercase letter immediately preceded by a
/// lowercase letter, scanning from the end. When the string does not end in
/// an uppercase letter, or no such boundary exists, the whole input is the
/// entity code and the suffix is empty.
pub fn split_entity_code(combined: &str) -> (&str, &str) {
    let chars: Vec<char> = combined.chars().collect();
    match chars.last() {
        Some(c) if c.is_alphabetic() && c.is_uppercase() => {}
        _ => return (combined, ""),
    }

    let mut split_index = None;
    for i in (1..chars.len()).rev() {
        if chars[i].is_alphabetic()
            && chars[i].is_uppercase()
            && chars[i - 1].is_alphabetic()
            && chars[i - 1].is_lowercase()
        {
            split_index = Some(i);
            break;
        }
    }

    match split_index {
        // Indices are re-derived in bytes; the scan above is on chars, so
        // map the char index back to a byte offset for slicing.
        Some(i) => {
            let byte_index = combined
                .char_indices()
                .nth(i)
                .map(|(b, _)| b)
                .unwrap_or(combined.len());
            (&combined[..byte_index], &combined[byte_index..])
        }
        None => (combined, ""),
    }
}

/// Split every combined code in `items` and collect the unique upper-cased
/// entity codes and the unique upper-cased non-empty suffixes.
///
/// The returned vectors are sorted so callers emit deterministic documents.
pub fn split_entity_code_list(items: &[String]) -> (Vec<String>, Vec<String>) {
    let mut entity_names = BTreeSet::new();
    let mut predefined_types = BTreeSet::new();

    for item in items {
        if item.is_empty() {
            continue;
        }
        let (entity, predefined) = split_entity_code(item);
        entity_names.insert(entity.to_uppercase());
        if !predefined.is_empty() {
            predefined_types.insert(predefined.to_uppercase());
        }
    }

    (
        entity_names.into_iter().collect(),
        predefined_types.into_iter().collect(),
    )
}
