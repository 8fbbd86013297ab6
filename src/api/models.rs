use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::core::errors::{FieldError, SettlementError};
use crate::core::models::member::Member;

/// Body of `POST /api/smart-settlement`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct OptimizeSettlementRequest {
    /// Party id to net balance. Entries that are not numeric are ignored.
    #[serde(default)]
    #[schema(value_type = HashMap<String, f64>, example = json!({"1": 20.0, "2": -20.0}))]
    pub balances: Option<Map<String, Value>>,
    /// Roster records. Records that cannot be read are skipped.
    #[serde(default)]
    #[schema(value_type = Option<Vec<Member>>)]
    pub members: Option<Vec<Value>>,
}

impl OptimizeSettlementRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, SettlementError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(SettlementError::MissingBody);
        }
        // A JSON `null` body counts as an empty request.
        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                SettlementError::InvalidInput(
                    "body".to_string(),
                    FieldError {
                        field: "body".to_string(),
                        title: "Invalid request body".to_string(),
                        description: e.to_string(),
                    },
                )
            })
    }

    pub fn into_parts(self) -> (Map<String, Value>, Vec<Member>) {
        let members = self
            .members
            .unwrap_or_default()
            .iter()
            .filter_map(Member::from_value)
            .collect();
        (self.balances.unwrap_or_default(), members)
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Newtype wrapper for SettlementError to implement IntoResponse
pub struct ApiError(pub SettlementError);

impl From<SettlementError> for ApiError {
    fn from(err: SettlementError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, message) = match self.0 {
            SettlementError::MissingBody => (StatusCode::BAD_REQUEST, "Request body is required".to_string(), None),
            SettlementError::InvalidInput(field, detail) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid input for {}", field),
                Some(detail.description),
            ),
            err @ SettlementError::UnbalancedInput { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Unbalanced input".to_string(),
                Some(err.to_string()),
            ),
            err @ (SettlementError::StrategyFailed { .. }
            | SettlementError::FallbackFailed(_)
            | SettlementError::InternalServerError(_)
            | SettlementError::LoggingError(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(err.to_string()),
            ),
        };
        (status, Json(ErrorResponse { error, message })).into_response()
    }
}
