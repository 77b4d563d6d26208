//! Digit normalization for masked input.

/// Returns only the ASCII digits of `raw`, in order.
///
/// Masked input like "12.345.678/0001-95" or "(11) 91234-5678" validates on
/// its digit content, so every consumer normalizes through this one helper.
pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_everything_but_ascii_digits() {
        assert_eq!(digits("(11) 91234-5678"), "11912345678");
        assert_eq!(digits("12.345.678/0001-95"), "12345678000195");
        assert_eq!(digits("01310-100"), "01310100");
        assert_eq!(digits("no digits"), "");
        assert_eq!(digits(""), "");
    }

    #[test]
    fn ignores_non_ascii_digits() {
        // Digits from other scripts are not document or phone digits.
        assert_eq!(digits("١٢٣45"), "45");
    }
}
