//! Naming convention for interfaces synthesized by flattening.

/// Separator between a parent interface name and a property name.
pub const FLATTENED_SEPARATOR: &str = "_properties_";

/// Name of the interface extracted from property `property` of `parent`
/// (e.g. `("User", "address")` -> `"User_properties_address"`).
pub fn flattened_name(parent: &str, property: &str) -> String {
    format!("{}{}{}", parent, FLATTENED_SEPARATOR, property)
}

/// Whether `name` follows the flattened-property convention: at least one
/// character, the separator, then at least one character.
pub fn is_flattened_name(name: &str) -> bool {
    name.match_indices(FLATTENED_SEPARATOR)
        .any(|(idx, _)| idx > 0 && idx + FLATTENED_SEPARATOR.len() < name.len())
}

/// Whether `name` belongs to the primary export group.
///
/// A name is excluded as soon as it contains the separator followed by at
/// least one character, wherever the separator starts.
pub fn is_primary_name(name: &str) -> bool {
    !name
        .match_indices(FLATTENED_SEPARATOR)
        .any(|(idx, _)| idx + FLATTENED_SEPARATOR.len() < name.len())
}
