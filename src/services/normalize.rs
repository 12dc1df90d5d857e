//! Impact label normalization.

/// Map a raw impact label onto `High` / `Medium` / `Low` / `Unknown`.
///
/// Case-insensitive substring checks in fixed priority order; a label
/// containing both "high" and "blue" resolves to `High` because it is
/// checked first. Unrecognized but non-empty labels pass through verbatim.
pub fn normalize_impact(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("high") || lower.contains("red") {
        "High".to_string()
    } else if lower.contains("medium") || lower.contains("med") || lower.contains("blue") {
        "Medium".to_string()
    } else if lower.contains("low") || lower.contains("gray") || lower.contains("grey") {
        "Low".to_string()
    } else if !raw.is_empty() {
        raw.to_string()
    } else {
        "Unknown".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_impact;

    #[test]
    fn test_high_variants() {
        assert_eq!(normalize_impact("High Impact"), "High");
        assert_eq!(normalize_impact("HIGH"), "High");
        assert_eq!(normalize_impact("icon icon--red"), "High");
    }

    #[test]
    fn test_medium_variants() {
        assert_eq!(normalize_impact("Medium"), "Medium");
        assert_eq!(normalize_impact("med"), "Medium");
        assert_eq!(normalize_impact("blue dot"), "Medium");
    }

    #[test]
    fn test_low_variants() {
        assert_eq!(normalize_impact("Low Impact"), "Low");
        assert_eq!(normalize_impact("gray"), "Low");
        assert_eq!(normalize_impact("Grey"), "Low");
    }

    #[test]
    fn test_priority_order() {
        // Contains both "high" and "blue"; "high" is checked first.
        assert_eq!(normalize_impact("high blue"), "High");
        // "medium" beats "low".
        assert_eq!(normalize_impact("medium-low"), "Medium");
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(normalize_impact("unclassified"), "unclassified");
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(normalize_impact(""), "Unknown");
    }
}
