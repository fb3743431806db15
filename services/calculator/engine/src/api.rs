use serde::{Deserialize, Serialize};

use crate::error::QueryError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ComputeRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ComputeResponse {
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&QueryError> for ErrorResponse {
    fn from(e: &QueryError) -> Self {
        ErrorResponse {
            code: e.code().to_string(),
            message: e.to_string(),
        }
    }
}
