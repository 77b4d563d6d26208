//! Checksum validation for the 14-digit CNPJ tax identifier.

use model::digits;

/// Validates the check digits of a CNPJ, masked or not.
///
/// The value is normalized to its digits first. Anything that is not exactly
/// 14 digits is invalid, as is the degenerate all-identical form, which
/// passes the arithmetic but is never an assigned identifier.
pub fn is_valid(raw: &str) -> bool {
    let digits = digits::digits(raw);
    if digits.len() != 14 {
        return false;
    }
    let digits: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    if digits.iter().all(|&digit| digit == digits[0]) {
        return false;
    }
    check_digit(&digits[..12]) == digits[12] && check_digit(&digits[..13]) == digits[13]
}

/// Weighted checksum digit over the 12-digit base (or the 13-digit base for
/// the second pass): weights start at 2 on the rightmost digit, grow going
/// left and wrap back to 2 after reaching 9. The sum modulo 11 maps to 0
/// when the remainder is below 2 and to `11 - remainder` otherwise.
fn check_digit(base: &[u8]) -> u8 {
    let mut weight = 2u32;
    let mut sum = 0u32;
    for &digit in base.iter().rev() {
        sum += u32::from(digit) * weight;
        weight = if weight == 9 { 2 } else { weight + 1 };
    }
    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => (11 - remainder) as u8,
    }
}
