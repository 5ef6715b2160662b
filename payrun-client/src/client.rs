use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use payrun_core::{ComputeRequest, EmployeeDetails, PayrunService, ServiceError, TaxResult};

const EMPLOYEE_DETAILS_ENDPOINT: &str = "get-employee-details-ency";
const COMPUTE_ENDPOINT: &str = "income-tax";
const RATING_ENDPOINT: &str = "updated-rating";

const GENERIC_REJECTION: &str = "Invalid response from server";

/// Wire envelope every payrun endpoint answers with.
#[derive(Debug, serde::Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// [`PayrunService`] over HTTP.
///
/// One attempt per call and no request timeout: the only timing discipline
/// in this flow belongs to the form's scheduler, not the transport.
#[derive(Debug, Clone)]
pub struct HttpPayrunService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPayrunService {
    /// `base_url` is the payrun API root, e.g.
    /// `https://apiv1.resolvepay.in/payrun`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Unpack an envelope response.
    ///
    /// A parseable envelope wins over the HTTP status: error responses that
    /// carry a server message surface that message verbatim. Only bodies
    /// that cannot be read as an envelope fall back to status-level errors.
    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(envelope) => match envelope {
                Envelope {
                    success: true,
                    data: Some(data),
                    ..
                } => Ok(data),
                Envelope { message, .. } => Err(ServiceError::Rejected(
                    message.unwrap_or_else(|| GENERIC_REJECTION.to_string()),
                )),
            },
            Err(e) if status.is_success() => Err(ServiceError::InvalidResponse(e.to_string())),
            Err(_) => Err(ServiceError::Transport(format!("HTTP {status}"))),
        }
    }
}

#[async_trait]
impl PayrunService for HttpPayrunService {
    async fn employee_details(&self, user_ref: &str) -> Result<EmployeeDetails, ServiceError> {
        let url = self.endpoint(&[EMPLOYEE_DETAILS_ENDPOINT, user_ref]);
        debug!(%url, "fetching employee details");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        self.decode(response).await
    }

    async fn compute_tax(&self, request: &ComputeRequest) -> Result<TaxResult, ServiceError> {
        let url = self.endpoint(&[COMPUTE_ENDPOINT]);
        debug!(%url, financial_year = %request.financial_year, "submitting tax computation");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        self.decode(response).await
    }

    async fn submit_rating(&self, user_ref: &str, stars: u8) -> Result<(), ServiceError> {
        let url = self.endpoint(&[RATING_ENDPOINT, user_ref, &stars.to_string()]);
        debug!(%url, stars, "submitting rating");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if let Err(e) = response.error_for_status() {
            warn!(error = %e, "rating submission failed");
            return Err(ServiceError::Transport(e.to_string()));
        }
        Ok(())
    }
}
