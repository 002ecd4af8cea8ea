use once_cell::sync::Lazy;
use regex::Regex;

/// Wikipedia footnote references, e.g. `[note 3]`.
static NOTE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[note \d+\]").expect("note marker regex should compile"));

/// Leading transition phrases, tried in this order; the first hit is removed.
const ACTION_PREFIXES: &[&str] = &[
    "Merged into ",
    "Name changed to ",
    "Divided into:",
    "Divided into: ",
    "Split into ",
];

/// Collapse whitespace runs to one space and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every `[note N]` marker.
pub fn strip_notes(s: &str) -> String {
    NOTE_MARKER.replace_all(s, "").into_owned()
}

/// Remove the first matching action phrase from the start of `s`.
pub fn strip_action_prefix(s: &str) -> &str {
    ACTION_PREFIXES
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix))
        .unwrap_or(s)
}

/// Clean a display name: footnote markers and a leading action phrase go,
/// whitespace is collapsed. Absent or blank input gives an empty string.
pub fn clean_name(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let without_notes = strip_notes(raw);
    let mut cleaned = collapse_ws(strip_action_prefix(&without_notes));

    // removing a marker or squeezing spaces can assemble a new one
    while NOTE_MARKER.is_match(&cleaned) {
        cleaned = collapse_ws(&strip_notes(&cleaned));
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_blank_give_empty() {
        assert_eq!(clean_name(None), "");
        assert_eq!(clean_name(Some("   ")), "");
    }

    #[test]
    fn strips_notes_anywhere() {
        assert_eq!(clean_name(Some("Burma[note 1]")), "Burma");
        assert_eq!(clean_name(Some("[note 12] East  Timor [note 3]")), "East Timor");
    }

    #[test]
    fn strips_one_action_prefix() {
        assert_eq!(clean_name(Some("Merged into Tanzania")), "Tanzania");
        assert_eq!(clean_name(Some("Name changed to Benin")), "Benin");
        assert_eq!(clean_name(Some("Divided into: Serbia")), "Serbia");
        assert_eq!(clean_name(Some("Split into Czechia")), "Czechia");
        // only once, and only at the start
        assert_eq!(
            clean_name(Some("Merged into Merged into X")),
            "Merged into X"
        );
        assert_eq!(clean_name(Some("Later merged into Y")), "Later merged into Y");
        assert_eq!(
            clean_name(Some("Merged into Name changed to X")),
            "Name changed to X"
        );
    }

    #[test]
    fn never_leaves_a_marker_behind() {
        for raw in [
            "[note [note 1]2]",
            "[note  7]",
            "a [note\t4] b",
            "[note [note [note 1]1]1]",
        ] {
            let cleaned = clean_name(Some(raw));
            assert!(!NOTE_MARKER.is_match(&cleaned), "{raw:?} -> {cleaned:?}");
        }
    }

    #[test]
    fn collapse_ws_trims() {
        assert_eq!(collapse_ws("  a \n\t b  "), "a b");
        assert_eq!(collapse_ws(""), "");
    }
}
