use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("invalid scheme: {0:?}")]
    InvalidScheme(String),

    #[error("invalid parameters for {scheme} scheme: {reason}")]
    InvalidParameterCombination { scheme: String, reason: String },

    #[error("payment {payment} does not cover the first month's interest {interest}")]
    DomainError { payment: f64, interest: f64 },

    #[error("{quantity} is out of range: {value}")]
    OutOfRange { quantity: String, value: f64 },
}

impl LoanError {
    pub(crate) fn combination(scheme: impl Into<String>, reason: impl Into<String>) -> Self {
        LoanError::InvalidParameterCombination {
            scheme: scheme.into(),
            reason: reason.into(),
        }
    }

    /// True for the errors reported to the user as "Incorrect parameters".
    pub fn is_invalid_parameters(&self) -> bool {
        matches!(
            self,
            LoanError::InvalidScheme(_) | LoanError::InvalidParameterCombination { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::LoanError;
    use test_log::test;

    #[test]
    fn test_invalid_parameters_grouping() {
        assert!(LoanError::InvalidScheme("diff".to_string()).is_invalid_parameters());
        assert!(LoanError::combination("annuity", "interest is required").is_invalid_parameters());
        assert!(!LoanError::DomainError {
            payment: 100.,
            interest: 1000.
        }
        .is_invalid_parameters());
        assert!(!LoanError::OutOfRange {
            quantity: "payment".to_string(),
            value: f64::INFINITY
        }
        .is_invalid_parameters());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            LoanError::combination("differentiated", "payment must not be supplied").to_string(),
            "invalid parameters for differentiated scheme: payment must not be supplied"
        );
        assert_eq!(
            LoanError::InvalidScheme("mortgage".to_string()).to_string(),
            "invalid scheme: \"mortgage\""
        );
        assert_eq!(
            LoanError::OutOfRange {
                quantity: "periods".to_string(),
                value: f64::INFINITY
            }
            .to_string(),
            "periods is out of range: inf"
        );
    }
}
