use crate::errors::ErrorResponse;
use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Offset/limit query parameters shared by the list endpoints.
#[derive(Debug, Deserialize, Serialize, IntoParams)]
pub struct ListParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

/// `Json` extractor whose rejections keep the API's JSON error shape:
/// malformed bodies come back as 400/415/422 with an [`ErrorResponse`]
/// payload instead of axum's plain-text default.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let status = rejection.status();
                let body = ErrorResponse {
                    error: status
                        .canonical_reason()
                        .unwrap_or("Unprocessable Entity")
                        .to_string(),
                    message: rejection.body_text(),
                    details: None,
                    timestamp: Utc::now().to_rfc3339(),
                };
                Err((status, Json(body)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_default_to_legacy_values() {
        let params: ListParams = serde_json::from_str("{}").expect("deserializes");
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 100);
    }

    #[test]
    fn list_params_accept_overrides() {
        let params: ListParams =
            serde_json::from_str(r#"{"skip": 40, "limit": 20}"#).expect("deserializes");
        assert_eq!(params.skip, 40);
        assert_eq!(params.limit, 20);
    }
}
