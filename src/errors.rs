use std::path::PathBuf;

use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use serde_json::json;
use thiserror::Error;

/// Failures on either path that produces a feed document.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("MTA service returned {0}")]
    UpstreamHttp(reqwest::StatusCode),
    #[error("Failed to reach MTA service: {0}")]
    UpstreamNetwork(#[from] reqwest::Error),
    #[error("Failed to parse service status XML: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("Failed to read sample status file {path:?}: {source}")]
    SampleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while the status board polls the JSON endpoint.
#[derive(Error, Debug)]
pub enum ClientFetchError {
    #[error("Request failed: {0}")]
    Http(reqwest::StatusCode),
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Failed to decode status payload: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unable to load subway status right now.")]
    StatusUnavailable(#[from] FeedError),
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::StatusUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "message": self.to_string() }))
    }
}
