// Input Validation
//
// Checks applied to raw text before anything is written. A failed
// check leaves every store untouched.

/// Rejected user input.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be a whole number, got `{value}`")]
    NotANumber { field: &'static str, value: String },
}

/// Fail with [`ValidationError::MissingField`] when `value` is empty.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Parse an integer count such as a number of nights.
///
/// Values must fit in 32 bits. Surrounding whitespace is ignored. Zero
/// and negative values parse.
pub fn parse_count(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    let trimmed = value.trim();
    require(field, trimmed)?;
    trimmed
        .parse::<i32>()
        .map(i64::from)
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_missing() {
        assert_eq!(
            require("name", ""),
            Err(ValidationError::MissingField { field: "name" })
        );
        assert!(require("name", "Alice").is_ok());
    }

    #[test]
    fn counts_parse_with_whitespace_and_sign() {
        assert_eq!(parse_count("nights", " 3 "), Ok(3));
        assert_eq!(parse_count("nights", "0"), Ok(0));
        assert_eq!(parse_count("nights", "-2"), Ok(-2));
    }

    #[test]
    fn non_numeric_count_is_not_a_number() {
        let err = parse_count("nights", "two").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotANumber {
                field: "nights",
                value: "two".into()
            }
        );
        assert!(matches!(
            parse_count("nights", "1.5"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn counts_outside_32_bits_are_rejected() {
        assert_eq!(parse_count("nights", "2147483647"), Ok(2_147_483_647));
        assert_eq!(parse_count("nights", "-2147483648"), Ok(-2_147_483_648));
        assert!(matches!(
            parse_count("nights", "3000000000"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn blank_count_is_missing() {
        assert_eq!(
            parse_count("nights", "  "),
            Err(ValidationError::MissingField { field: "nights" })
        );
    }
}
