use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use std::io::Cursor;

/// Errors talking to the Home Assistant REST API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("invalid response ({1}): {0}")]
    InvalidResponse(String, String),
    #[error("rate exceeded: {0}")]
    RateExceeded(String),
    #[error("failed to encode response")]
    FormatError,
    #[error("internal error")]
    InternalError,
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let (status, error) = match self {
            Error::RateExceeded(s) => (
                Status::TooManyRequests,
                format!("<html><body><h3>429 Too Many Requests</h3>Home Assistant response: <code>{}</code></body></html>", s),
            ),
            Error::Unauthorized(s) => (
                Status::Forbidden,
                format!("<html><body><h3>403 Forbidden</h3>Error while authenticating to Home Assistant: <code>{}</code></body></html>", s),
            ),
            _ => (
                Status::InternalServerError,
                format!(
                    "<html><body><h3>Unknown exception</h3><code>{:?}</code></body></html>",
                    self
                ),
            ),
        };

        Response::build()
            .status(status)
            .sized_body(error.len(), Cursor::new(error))
            .header(ContentType::new("text", "html"))
            .ok()
    }
}
