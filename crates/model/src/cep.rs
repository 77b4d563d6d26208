use {
    crate::digits,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// A Brazilian postal code (CEP), stored as its 8 digits without the mask.
///
/// Construction goes through [`FromStr`], which strips mask characters and
/// rejects anything that does not leave exactly 8 digits. Holding a `Cep`
/// therefore proves the structural rule; whether the code actually exists is
/// a separate, asynchronous question answered by the lookup service.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cep(String);

impl Cep {
    /// The 8 digits, unmasked.
    pub fn as_digits(&self) -> &str {
        &self.0
    }

    /// The conventional "00000-000" rendering.
    pub fn masked(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid postal code {raw:?}: expected 8 digits, found {digits}")]
pub struct InvalidCep {
    pub raw: String,
    pub digits: usize,
}

impl FromStr for Cep {
    type Err = InvalidCep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = digits::digits(s);
        if digits.len() != 8 {
            return Err(InvalidCep {
                raw: s.to_string(),
                digits: digits.len(),
            });
        }
        Ok(Self(digits))
    }
}

impl TryFrom<String> for Cep {
    type Error = InvalidCep;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Cep> for String {
    fn from(cep: Cep) -> Self {
        cep.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_masked_and_unmasked_input() {
        assert_eq!("01310-100".parse::<Cep>().unwrap().as_digits(), "01310100");
        assert_eq!("01310100".parse::<Cep>().unwrap().as_digits(), "01310100");
        assert_eq!(" 01310 100 ".parse::<Cep>().unwrap().as_digits(), "01310100");
    }

    #[test]
    fn rejects_wrong_digit_counts() {
        for raw in ["0131010", "013101000", "", "abcdefgh", "01310-10a"] {
            let err = raw.parse::<Cep>().unwrap_err();
            assert_eq!(err.raw, raw);
        }
    }

    #[test]
    fn renders_mask() {
        let cep: Cep = "01310100".parse().unwrap();
        assert_eq!(cep.masked(), "01310-100");
        assert_eq!(cep.to_string(), "01310100");
    }
}
