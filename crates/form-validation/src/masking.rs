//! Pure input maskers.
//!
//! Hosts call these on every keystroke; the engine itself never does. Each
//! function maps an arbitrary raw string to the canonical partial mask for
//! whatever was typed so far, so validation only ever sees the final value.

use {crate::predicates, model::digits};

/// Progressive "(DD) 99999-9999" phone mask, capped at 11 digits.
pub fn phone(raw: &str) -> String {
    let digits = digits::digits(raw);
    let digits = &digits[..digits.len().min(11)];
    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({digits}"),
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Progressive "00000-000" postal-code mask, capped at 8 digits.
pub fn cep(raw: &str) -> String {
    let digits = digits::digits(raw);
    let digits = &digits[..digits.len().min(8)];
    if digits.len() > 5 {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits.to_string()
    }
}

/// Keystroke filter for the responsible-person field: drops everything that
/// is not a letter (accented Latin included) or whitespace.
pub fn responsible_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| predicates::is_responsible_char(*c))
        .collect()
}
