//! Validated mainland-China mobile phone numbers, as accepted by the inquiry form.
use std::sync::LazyLock;

static MOBILE_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^1[358]\d{9}$|^147\d{8}$|^176\d{8}$").expect("Mobile regex invalid")
});

/// The length every accepted number has.
pub const MOBILE_LENGTH: usize = 11;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MobileNumber(String);

impl TryFrom<&str> for MobileNumber {
    type Error = ();
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = ();
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.len() == MOBILE_LENGTH && MOBILE_REGEX.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(())
        }
    }
}

impl From<MobileNumber> for String {
    fn from(number: MobileNumber) -> Self {
        let MobileNumber(s) = number;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::MobileNumber;

    #[test]
    fn accepts_known_prefixes() {
        for number in ["13812345678", "15000000000", "18999999999", "14712345678", "17612345678"] {
            assert!(MobileNumber::try_from(number).is_ok(), "{number} should be valid");
        }
    }

    #[test]
    fn rejects_bad_numbers() {
        for number in ["", "1381234567", "138123456789", "12812345678", "17712345678", "1381234567a", "+8613812345678"] {
            assert!(MobileNumber::try_from(number).is_err(), "{number} should be invalid");
        }
    }
}
