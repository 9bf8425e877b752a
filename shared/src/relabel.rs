//! Window-specific relabeling of serialized average records
//!
//! Moving-average records serialize with one generic value field whatever
//! the window length. When several windows share an index each upload
//! target disambiguates that field with the window label taken from its
//! index name, so a 15-day and a 50-day series never collide.

/// Serialized field name shared by every moving-average window.
pub const GENERIC_AVERAGE_FIELD: &str = "sma";

/// Extracts the window label from an index name.
///
/// The label is the final hyphen-delimited segment (`"sma-15"` → `"15"`);
/// an index name without a hyphen is used whole.
pub fn window_label(index_name: &str) -> &str {
    match index_name.rsplit_once('-') {
        Some((_, label)) => label,
        None => index_name,
    }
}

/// Replaces the first occurrence of the generic average field in an
/// already-serialized payload with the window label for `index_name`.
///
/// This is a textual substitution on the encoded payload, not a rename at
/// the data-model level. Only the first occurrence is touched; callers
/// must keep the generic name out of earlier payload positions.
pub fn relabel_payload(payload: &str, index_name: &str) -> String {
    payload.replacen(GENERIC_AVERAGE_FIELD, window_label(index_name), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_label_takes_final_segment() {
        assert_eq!(window_label("sma-15"), "15");
        assert_eq!(window_label("stock-sma-50"), "50");
    }

    #[test]
    fn test_window_label_without_hyphen_uses_whole_name() {
        assert_eq!(window_label("smadata"), "smadata");
    }

    #[test]
    fn test_window_label_with_trailing_hyphen_is_empty() {
        assert_eq!(window_label("sma-"), "");
    }

    #[test]
    fn test_relabel_replaces_only_the_field_position() {
        let payload = r#"{"date":"2024-01-02","sma":150.42}"#;
        let relabeled = relabel_payload(payload, "idx-15");
        assert_eq!(relabeled, r#"{"date":"2024-01-02","15":150.42}"#);
    }

    #[test]
    fn test_relabel_touches_first_occurrence_only() {
        let payload = r#"{"sma":1.0,"note":"sma"}"#;
        let relabeled = relabel_payload(payload, "idx-15");
        assert_eq!(relabeled, r#"{"15":1.0,"note":"sma"}"#);
    }

    #[test]
    fn test_relabel_without_hyphen_uses_index_name() {
        let payload = r#"{"date":"2024-01-02","sma":150.42}"#;
        let relabeled = relabel_payload(payload, "averages");
        assert_eq!(relabeled, r#"{"date":"2024-01-02","averages":150.42}"#);
    }
}
