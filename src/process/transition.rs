use crate::schema::TransitionType;

/// Classify a transition description by keyword, case-insensitively.
/// Checked in order: merged, name changed, divided/split, anything else.
pub fn classify(raw: Option<&str>) -> TransitionType {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return TransitionType::Other;
    };
    let lower = raw.to_lowercase();

    if lower.contains("merged into") {
        TransitionType::Merged
    } else if lower.contains("name changed") {
        TransitionType::NameChanged
    } else if lower.contains("divided into") || lower.contains("split into") {
        TransitionType::Divided
    } else {
        TransitionType::Other
    }
}
