use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ComputeRequest, EmployeeDetails, TaxResult};

/// Failures surfaced by a payrun back-end.
///
/// Every variant is terminal at the form boundary: the session maps it to a
/// dismissible message and carries on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The back-end answered but declined (`success: false`), or an error
    /// response carried a usable message.
    #[error("{0}")]
    Rejected(String),

    /// The request never completed: connection, DNS, or I/O failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A 2xx response whose body did not match the expected envelope.
    #[error("malformed response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// The server-authored message, when one exists. Callers fall back to
    /// their own generic wording otherwise.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

/// The payrun back-end as the form sees it: one employee-details fetch, one
/// tax computation, one fire-and-forget rating submission.
///
/// A single attempt per call; retry policy is deliberately not part of this
/// contract.
#[async_trait]
pub trait PayrunService: Send + Sync {
    /// Fetch the employee record that seeds the form.
    async fn employee_details(&self, user_ref: &str) -> Result<EmployeeDetails, ServiceError>;

    /// Run one tax computation for the given payload.
    async fn compute_tax(&self, request: &ComputeRequest) -> Result<TaxResult, ServiceError>;

    /// Record a star rating. Failures are for logging only; callers must
    /// never surface them to the user.
    async fn submit_rating(&self, user_ref: &str, stars: u8) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rejected_exposes_the_server_message() {
        let err = ServiceError::Rejected("Invalid financial year".to_string());
        assert_eq!(err.server_message(), Some("Invalid financial year"));
        assert_eq!(err.to_string(), "Invalid financial year");
    }

    #[test]
    fn transport_and_decode_errors_have_no_server_message() {
        assert_eq!(
            ServiceError::Transport("connection refused".to_string()).server_message(),
            None
        );
        assert_eq!(
            ServiceError::InvalidResponse("missing data".to_string()).server_message(),
            None
        );
    }
}
