//! RFC-9457 problem responses.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{StatusCode, header};

use caller_authz::AccessDenied;

use crate::api::dto::PrincipalDto;

/// RFC-9457 Problem Details body.
///
/// Authorization denials additionally carry the machine `reason` code and
/// the denying principal's public attributes for caller-side diagnostics.
#[derive(Debug, serde::Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    type_uri: String,
    title: String,
    status: u16,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal: Option<PrincipalDto>,
}

impl Problem {
    #[must_use]
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_uri: "about:blank".to_owned(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
            reason: None,
            principal: None,
        }
    }
}

impl From<AccessDenied> for Problem {
    fn from(err: AccessDenied) -> Self {
        let principal = PrincipalDto::from(err.principal());
        let mut problem = Self::new(StatusCode::FORBIDDEN, "Forbidden", err.message());
        problem.reason = Some(err.reason().as_str().to_owned());
        problem.principal = Some(principal);
        problem
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}
