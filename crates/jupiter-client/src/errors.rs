use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JupiterClientError {
    #[error("Error while making request: {}", _0)]
    ApiCallError(#[from] reqwest::Error),

    #[error("Request to {} failed with status: {}", _0, _1)]
    RequestFailed(String, StatusCode),

    #[error("Deserialization Error - Original String {}, Error {}", _0, _1)]
    DeserializationError(String, serde_json::Error),
}
