//! Entity identifier validation for imported rows.

use std::sync::LazyLock;

use regex::Regex;

use crate::spreadsheet::CellValue;
use crate::types::EntityId;

/// Canonical hyphenated UUID with a version nibble of 1-5 and an RFC 4122
/// variant nibble.
const UUID_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

static UUID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UUID_PATTERN).expect("valid regex"));

/// Returns `true` if `value` has the exact UUID shape accepted on import.
pub fn is_valid_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// Extract an entity identifier from a cell.
///
/// The cell text is trimmed before matching. Returns `None` for empty
/// cells and anything that is not a well-formed identifier.
pub fn parse_entity_id(cell: &CellValue) -> Option<EntityId> {
    let text = cell.as_text()?;
    if !is_valid_uuid(&text) {
        return None;
    }
    EntityId::parse_str(&text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_v4_uuid_in_either_case() {
        assert!(is_valid_uuid("3f2b8c1e-9d4a-4e6b-8a1c-2d3e4f5a6b7c"));
        assert!(is_valid_uuid("3F2B8C1E-9D4A-4E6B-8A1C-2D3E4F5A6B7C"));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(!is_valid_uuid("not-a-uuid"));
        assert!(!is_valid_uuid(""));
        // Version nibble 0 and 6+ are outside the accepted range.
        assert!(!is_valid_uuid("3f2b8c1e-9d4a-0e6b-8a1c-2d3e4f5a6b7c"));
        assert!(!is_valid_uuid("3f2b8c1e-9d4a-7e6b-8a1c-2d3e4f5a6b7c"));
        // Variant nibble must be 8, 9, a or b.
        assert!(!is_valid_uuid("3f2b8c1e-9d4a-4e6b-ca1c-2d3e4f5a6b7c"));
        // No braces, no missing hyphens, no trailing text.
        assert!(!is_valid_uuid("{3f2b8c1e-9d4a-4e6b-8a1c-2d3e4f5a6b7c}"));
        assert!(!is_valid_uuid("3f2b8c1e9d4a4e6b8a1c2d3e4f5a6b7c"));
        assert!(!is_valid_uuid("3f2b8c1e-9d4a-4e6b-8a1c-2d3e4f5a6b7c0"));
    }

    #[test]
    fn parse_entity_id_trims_text_cells() {
        let cell = CellValue::from("  3f2b8c1e-9d4a-4e6b-8a1c-2d3e4f5a6b7c ");
        let id = parse_entity_id(&cell).expect("trimmed uuid should parse");
        assert_eq!(id.to_string(), "3f2b8c1e-9d4a-4e6b-8a1c-2d3e4f5a6b7c");
    }

    #[test]
    fn parse_entity_id_rejects_non_text_cells() {
        assert_eq!(parse_entity_id(&CellValue::Null), None);
        assert_eq!(parse_entity_id(&CellValue::Number(12.0)), None);
        assert_eq!(parse_entity_id(&CellValue::Bool(true)), None);
    }
}
