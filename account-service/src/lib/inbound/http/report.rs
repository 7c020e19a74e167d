use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// One structured error entry, covering both field validation and
/// business-rule failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub entity: String,
    pub attribute: String,
    pub status: u16,
    pub message: String,
}

/// Per-request collector of structured error entries.
///
/// Entries keep insertion order for the response body. The report also
/// tracks a single top-level status for the whole request: a server
/// error (>= 500) always wins and is only replaced by another server
/// error, so a later client-caused entry can never mask it; among
/// client errors the numerically largest (most specific) status wins.
///
/// Reports are built fresh per request and never shared, so one
/// caller's errors cannot leak into another's response.
#[derive(Debug, Clone, Default)]
pub struct ErrorReport {
    errors: Vec<ErrorDetail>,
    server_status: Option<u16>,
    client_status: Option<u16>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a report carrying a single entry.
    pub fn single(
        entity: impl Into<String>,
        attribute: impl Into<String>,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        let mut report = Self::new();
        report.add(entity, attribute, status, message);
        report
    }

    /// Record an entry and fold its status into the tracked one.
    pub fn add(
        &mut self,
        entity: impl Into<String>,
        attribute: impl Into<String>,
        status: StatusCode,
        message: impl Into<String>,
    ) -> &mut Self {
        let status = status.as_u16();

        self.errors.push(ErrorDetail {
            entity: entity.into(),
            attribute: attribute.into(),
            status,
            message: message.into(),
        });

        if status >= 500 {
            self.server_status = Some(status);
        } else {
            self.client_status = Some(self.client_status.unwrap_or(0).max(status));
        }

        self
    }

    /// The tracked top-level status. Defaults to 500 when nothing has
    /// been recorded.
    pub fn status(&self) -> StatusCode {
        let code = self
            .server_status
            .or(self.client_status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR.as_u16());

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// All recorded entries in insertion order.
    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Reset entries and tracked status for reuse between independent
    /// passes.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.server_status = None;
        self.client_status = None;
    }
}

impl IntoResponse for ErrorReport {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "errors": self.errors }))).into_response()
    }
}
