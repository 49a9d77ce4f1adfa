use std::sync::LazyLock;

use regex::Regex;

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^03[0-9]{9}$").expect("phone pattern compiles"));

/// Pakistani mobile format: `03` followed by exactly nine digits.
pub fn is_valid_phone_number(input: &str) -> bool {
    PHONE_NUMBER.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::is_valid_phone_number;

    #[test]
    fn accepts_national_mobile_numbers() {
        assert!(is_valid_phone_number("03001234567"));
        assert!(is_valid_phone_number("03111111111"));
        assert!(is_valid_phone_number("03999999999"));
    }

    #[test]
    fn rejects_wrong_prefix_or_length() {
        assert!(!is_valid_phone_number("3001234567"));
        assert!(!is_valid_phone_number("0300123456"));
        assert!(!is_valid_phone_number("030012345678"));
        assert!(!is_valid_phone_number("04001234567"));
        assert!(!is_valid_phone_number("+923001234567"));
        assert!(!is_valid_phone_number(""));
    }

    #[test]
    fn rejects_non_digits_and_padding() {
        assert!(!is_valid_phone_number("03AB1234567"));
        assert!(!is_valid_phone_number(" 03001234567"));
        assert!(!is_valid_phone_number("03001234567\n"));
        assert!(!is_valid_phone_number("0300-123456"));
        // Non-ASCII digits must not slip through.
        assert!(!is_valid_phone_number("03٠٠١٢٣٤٥٦٧"));
    }
}
