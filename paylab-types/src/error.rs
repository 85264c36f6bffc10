//! Error types for the payment demo service.

/// Raised when the factory cannot map a discriminator to any known
/// payment method.
///
/// This is the only raised failure in the payment subsystem; business-rule
/// violations (bad amount, missing fields) are reported through a
/// rejection receipt instead.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("payment method '{requested}' is not supported")]
    UnsupportedPaymentType { requested: String },
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("payment method '{requested}' is not supported")]
    UnsupportedPaymentType { requested: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FactoryError> for AppError {
    fn from(err: FactoryError) -> Self {
        match err {
            FactoryError::UnsupportedPaymentType { requested } => {
                AppError::UnsupportedPaymentType { requested }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_error_keeps_offending_input() {
        let err = FactoryError::UnsupportedPaymentType {
            requested: "BITCOIN".to_string(),
        };
        assert!(err.to_string().contains("BITCOIN"));

        let app: AppError = err.into();
        assert!(matches!(
            app,
            AppError::UnsupportedPaymentType { requested } if requested == "BITCOIN"
        ));
    }
}
