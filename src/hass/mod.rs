//! Minimal Home Assistant REST client used by the preview host to obtain state snapshots.

pub mod endpoint;
pub mod error;
pub mod response;

use crate::model;
pub use error::Error;
use response::GetStates;

pub fn api(base_url: String, token: String) -> model::Api {
    model::Api {
        base_url: base_url.trim_end_matches('/').to_owned(),
        token,
    }
}

/// Map Non-200 API response to Error
fn map_api_err(error: reqwest::Error) -> Error {
    match error.status() {
        Some(http::StatusCode::TOO_MANY_REQUESTS) => Error::RateExceeded(error.to_string()),
        Some(http::StatusCode::UNAUTHORIZED) | Some(http::StatusCode::FORBIDDEN) => {
            Error::Unauthorized(error.to_string())
        }
        _ => Error::ApiError(error.to_string()),
    }
}

async fn get(api: &model::Api, endpoint: &endpoint::Endpoint) -> Result<String, Error> {
    let url = format!("{}{}", api.base_url, endpoint);

    let client = reqwest::ClientBuilder::new()
        .build()
        .or(Err(Error::InternalError))?;

    client
        .get(url)
        .bearer_auth(&api.token)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(map_api_err)?
        .text()
        .await
        .map_err(|e| Error::ApiError(format!("Error reading API response: {}", e)))
}

/// Fetch the current state of every entity known to Home Assistant.
pub async fn states(api: &model::Api) -> Result<model::StateSnapshot, Error> {
    let response_text = get(api, endpoint::STATES).await?;

    log::trace!("endpoint: {}, response_text: {}", endpoint::STATES, response_text);

    let response = serde_json::from_str::<GetStates>(&response_text)
        .map_err(|e| Error::InvalidResponse(response_text, e.to_string()))?;
    let snapshot = model::StateSnapshot::from(response);

    log::debug!("received {} entity states", snapshot.len());
    Ok(snapshot)
}
