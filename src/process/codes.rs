/// Pre-withdrawal ISO 3166-1 codes of a former country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormerCodes {
    pub alpha2: Option<String>,
    pub alpha3: Option<String>,
    pub numeric: Option<String>,
}

fn is_exact(token: &str, len: usize, pred: fn(&char) -> bool) -> bool {
    token.chars().count() == len && token.chars().all(|c| pred(&c))
}

/// Parse a comma-separated code list such as `"BU, BUR, 104"`.
///
/// Each token lands in the slot whose shape it matches exactly; anything
/// else is ignored. A later token overwrites an earlier one in the same slot.
pub fn parse_former_codes(raw: Option<&str>) -> FormerCodes {
    let mut codes = FormerCodes::default();
    let Some(raw) = raw else {
        return codes;
    };

    for token in raw.trim().split(',').map(str::trim) {
        if is_exact(token, 2, char::is_ascii_uppercase) {
            codes.alpha2 = Some(token.to_string());
        } else if is_exact(token, 3, char::is_ascii_uppercase) {
            codes.alpha3 = Some(token.to_string());
        } else if is_exact(token, 3, char::is_ascii_digit) {
            codes.numeric = Some(token.to_string());
        }
    }
    codes
}
