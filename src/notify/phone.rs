//! E.164 phone normalization.
//!
//! Raw contact numbers arrive in whatever shape the tourist typed. Delivery
//! requires a `+`-prefixed international form, so normalization strips the
//! noise and decides whether a usable number remains.

/// Normalize a raw phone string to E.164.
///
/// Non-digit characters are stripped first. Exactly 10 digits are assumed
/// North American and get `+1`; longer strings already carry a country code
/// and get `+`. Anything shorter has no usable E.164 form and yields `None`.
pub fn format_phone_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => Some(format!("+1{digits}")),
        n if n > 10 => Some(format!("+{digits}")),
        _ => None,
    }
}
