use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode data file: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("malformed record for {date}: {reason}")]
    MalformedRecord { date: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("no meal group at index {0}")]
    GroupOutOfRange(usize),
    #[error("no entry at index {entry} in meal group {group}")]
    EntryOutOfRange { group: usize, entry: usize },
    #[error("date out of range")]
    DateOutOfRange,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Store(err) => Self::internal(err),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// `Json` whose rejections come back as plain 400s.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
