use axum::http::StatusCode;

/// Outcome kinds reported by the user service to the handler layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Success,
    CreateFailure,
    GetFailure,
    UpdateFailure,
    DeleteFailure,
    NotFound,
}

impl ModelStatus {
    /// Text carried in the `Status` field of every response envelope.
    pub fn text(self) -> &'static str {
        match self {
            ModelStatus::Success => "Success",
            ModelStatus::CreateFailure => "User create failure",
            ModelStatus::GetFailure => "User get failure",
            ModelStatus::UpdateFailure => "User update failure",
            ModelStatus::DeleteFailure => "User delete failure",
            ModelStatus::NotFound => "User not found",
        }
    }

    /// The one mapping from outcome kind to HTTP status, shared by all handlers.
    pub fn http_status(self) -> StatusCode {
        match self {
            ModelStatus::Success => StatusCode::OK,
            ModelStatus::NotFound => StatusCode::NOT_FOUND,
            ModelStatus::CreateFailure
            | ModelStatus::GetFailure
            | ModelStatus::UpdateFailure
            | ModelStatus::DeleteFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_success(self) -> bool {
        self == ModelStatus::Success
    }
}

impl std::fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Result of one user service call: the value (possibly a default when the
/// call failed), the outcome kind and a human readable reason, empty on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOutcome<T> {
    pub value: T,
    pub status: ModelStatus,
    pub reason: String,
}

impl<T> ModelOutcome<T> {
    pub fn success(value: T) -> Self {
        Self {
            value,
            status: ModelStatus::Success,
            reason: String::new(),
        }
    }

    pub fn failure(value: T, status: ModelStatus, reason: impl Into<String>) -> Self {
        Self {
            value,
            status,
            reason: reason.into(),
        }
    }
}
