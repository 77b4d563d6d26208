//! Stateless field predicates.
//!
//! Every predicate is a total function from the raw field value to a bool:
//! malformed input of any shape is a normal `false`, never an error. The
//! user-facing messages live in the rule table, not here.

use {
    model::{digits, file::FileMeta, uf::Uf},
    regex::Regex,
    std::sync::LazyLock,
};

/// Media types accepted for the statute upload.
pub const ACCEPTED_DOCUMENT_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Upload size cap in bytes.
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Founding years the form accepts.
pub const FOUNDING_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1950..=2025;

// Deliberately simpler than the RFC grammar: a local part, "@", and a domain
// containing a dot followed by at least two characters.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());

pub fn name(raw: &str) -> bool {
    raw.trim().chars().count() >= 3
}

pub fn description(raw: &str) -> bool {
    raw.trim().chars().count() >= 20
}

pub fn email(raw: &str) -> bool {
    EMAIL_SHAPE.is_match(raw.trim())
}

/// Ten digits for landlines, eleven for mobile numbers, both with the area
/// code; mask characters don't count.
pub fn phone(raw: &str) -> bool {
    let digits = digits::digits(raw);
    digits.len() == 10 || digits.len() == 11
}

/// The raw value is not trimmed; a code with surrounding whitespace is
/// invalid.
pub fn state(raw: &str) -> bool {
    raw.parse::<Uf>().is_ok()
}

pub fn founding_year(raw: &str) -> bool {
    raw.trim()
        .parse::<i32>()
        .is_ok_and(|year| FOUNDING_YEAR_RANGE.contains(&year))
}

/// The website is optional; a non-empty value must be an absolute URL.
pub fn website(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || url::Url::parse(raw).is_ok()
}

/// Characters the responsible-person name may contain. The same set drives
/// the live keystroke filter in [`crate::masking::responsible_name`].
pub(crate) fn is_responsible_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('À'..='ÿ').contains(&c) || c.is_whitespace()
}

/// The stored value is checked from scratch: characters outside the allowed
/// set are stripped first, so correctness does not depend on the upstream
/// keystroke filter having run.
pub fn responsible(raw: &str) -> bool {
    let kept: String = raw.chars().filter(|c| is_responsible_char(*c)).collect();
    kept.trim().chars().count() >= 3
}

pub fn required_text(raw: &str) -> bool {
    !raw.trim().is_empty()
}

/// The document is optional; when present it must be a PDF, JPEG or PNG of
/// at most 5 MiB.
pub fn document(meta: Option<&FileMeta>) -> bool {
    match meta {
        None => true,
        Some(meta) => {
            ACCEPTED_DOCUMENT_TYPES.contains(&meta.media_type.as_str())
                && meta.byte_size <= MAX_DOCUMENT_BYTES
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_needs_three_characters() {
        assert!(!name(""));
        assert!(!name("ab"));
        assert!(!name("  ab  "));
        assert!(name("abc"));
        assert!(name(" ONG "));
        assert!(name("ção"));
    }

    #[test]
    fn description_needs_twenty_characters() {
        assert!(!description("short text"));
        assert!(!description(&" ".repeat(30)));
        assert!(description("Apoio escolar para crianças da zona leste."));
        assert!(description(&"x".repeat(20)));
        assert!(!description(&"x".repeat(19)));
    }

    #[test]
    fn email_shape() {
        assert!(email("a@b.co"));
        assert!(email("user.name@example.org"));
        assert!(email("  a@b.co  "));
        assert!(!email("a@b"));
        assert!(!email("a@@b.com"));
        assert!(!email("a b@c.co"));
        assert!(!email("a@b.c"));
        assert!(!email("a@.co"));
        assert!(!email(""));
    }

    #[test]
    fn phone_digit_count() {
        assert!(!phone("12345678-9"));
        assert!(phone("(11) 2345-6789"));
        assert!(phone("(11) 91234-5678"));
        assert!(phone("11912345678"));
        assert!(!phone("(11) 91234-56789"));
        assert!(!phone(""));
    }

    #[test]
    fn state_membership() {
        assert!(state("SP"));
        assert!(state("sp"));
        assert!(!state(" SP "));
        assert!(!state("XX"));
        assert!(!state("S"));
        assert!(!state(""));
    }

    #[test]
    fn founding_year_range() {
        assert!(!founding_year("1949"));
        assert!(founding_year("1950"));
        assert!(founding_year("2025"));
        assert!(!founding_year("2026"));
        assert!(!founding_year(""));
        assert!(!founding_year("two thousand"));
    }

    #[test]
    fn website_is_optional() {
        assert!(website(""));
        assert!(website("   "));
        assert!(website("https://ong.org.br"));
        assert!(website("http://ong.org.br/sobre"));
        assert!(!website("not a url"));
        // No scheme, not an absolute URL.
        assert!(!website("ong.org.br"));
    }

    #[test]
    fn responsible_strips_then_counts() {
        assert!(responsible("José da Silva"));
        assert!(responsible("Ana"));
        // Disallowed characters are dropped before counting.
        assert!(responsible("Jo@o1"));
        assert!(!responsible("J@1"));
        assert!(!responsible("123"));
        assert!(!responsible("  ab "));
        assert!(!responsible(""));
    }

    #[test]
    fn required_text_trims() {
        assert!(!required_text(""));
        assert!(!required_text("   "));
        assert!(required_text("x"));
    }

    #[test]
    fn document_constraints() {
        let meta = |media_type: &str, byte_size| {
            Some(FileMeta {
                media_type: media_type.to_string(),
                byte_size,
            })
        };
        assert!(document(None));
        assert!(document(meta("application/pdf", MAX_DOCUMENT_BYTES).as_ref()));
        assert!(document(meta("image/jpeg", 1024).as_ref()));
        assert!(document(meta("image/png", 1024).as_ref()));
        assert!(!document(meta("application/pdf", MAX_DOCUMENT_BYTES + 1).as_ref()));
        assert!(!document(meta("image/gif", 1024).as_ref()));
        assert!(!document(meta("", 0).as_ref()));
    }
}
