//! Backend client for PDF rendering and workspace file storage.
//!
//! The [`BrowserlessClient`] issues PDF-creation requests, uploads and
//! deletes workspace files, and implements the composite "render via
//! temporary file" workflow. All backend outcomes are classified into
//! [`ClientError`] before they reach the caller.
//!
//! # Example
//!
//! ```no_run
//! use browserless_client::{BrowserlessClient, PdfRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BrowserlessClient::new("http://browserless:3000")?;
//!
//! let mut request = PdfRequest::new();
//! request.set_url(Some("https://example.com"));
//!
//! let pdf = client.create_pdf_from_request(&request).await?;
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::ClientError;

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode, multipart};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::pdf::PdfRequest;
use crate::url::generate_url;
use crate::user_agent;
use crate::workspace::{WorkspaceFile, WorkspaceFileRecord};

/// HTTP connect timeout (10 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default per-request timeout when none is configured (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Outcome of a workspace-file delete.
///
/// A 404 from the backend means the file was already gone; that is a valid
/// outcome of its own, distinct from both a confirmed delete and an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend confirmed the delete (HTTP 204).
    Deleted,
    /// The file was already absent (HTTP 404); nothing left to delete.
    AlreadyAbsent,
}

/// Async client for the rendering backend.
///
/// Configuration (endpoint, token, timeout) is immutable after
/// construction. The client is cheap to clone and safe for concurrent use;
/// every call is independent against the remote backend.
#[derive(Debug, Clone)]
pub struct BrowserlessClient {
    http: Client,
    endpoint: String,
    token: Option<String>,
}

impl BrowserlessClient {
    /// Creates a client for an unauthenticated backend with the default
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] if `endpoint` is not a valid
    /// URL or the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Self::build(endpoint.into(), None, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client that appends `token` as a query parameter to every
    /// backend call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] if `endpoint` is not a valid
    /// URL or the HTTP client cannot be constructed.
    pub fn with_token(
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::build(endpoint.into(), Some(token.into()), DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with an explicit per-request timeout in seconds.
    ///
    /// The timeout bounds each individual backend call; there is no
    /// cancellation beyond it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] if `endpoint` is not a valid
    /// URL or the HTTP client cannot be constructed.
    pub fn with_token_and_timeout(
        endpoint: impl Into<String>,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ClientError> {
        Self::build(endpoint.into(), token, timeout_secs)
    }

    fn build(
        endpoint: String,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ClientError> {
        Url::parse(&endpoint).map_err(|error| {
            ClientError::invalid_request(format!("endpoint is not a valid URL: {error}"))
        })?;

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|error| {
                ClientError::invalid_request(format!("failed to build HTTP client: {error}"))
            })?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    /// Renders a PDF from a prepared [`PdfRequest`].
    ///
    /// Exactly one of `url`/`html` must be set on the request; neither or
    /// both fail validation before any network call. The request payload is
    /// [`PdfRequest::export`]; the response body is returned as the raw PDF
    /// bytes.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRequest`] when the url/html precondition is
    ///   violated.
    /// - [`ClientError::AuthFailure`] on HTTP 403.
    /// - [`ClientError::HttpStatus`] on any other error status.
    /// - [`ClientError::Timeout`] / [`ClientError::Network`] on transport
    ///   faults.
    #[instrument(skip(self, request))]
    pub async fn create_pdf_from_request(
        &self,
        request: &PdfRequest,
    ) -> Result<Vec<u8>, ClientError> {
        match (request.url(), request.html()) {
            (None, None) => {
                return Err(ClientError::invalid_request(
                    "either url or html must be set",
                ));
            }
            (Some(_), Some(_)) => {
                return Err(ClientError::invalid_request(
                    "url and html are mutually exclusive",
                ));
            }
            _ => {}
        }

        let url = self.endpoint_url("/pdf");
        debug!(url = %url, "rendering PDF");

        let response = self
            .send(
                self.http
                    .post(&url)
                    .header(ACCEPT, "application/json")
                    .json(&request.export()),
                &url,
            )
            .await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|error| classify_transport(&url, error))?;

        info!(bytes = bytes.len(), "PDF rendered");
        Ok(bytes.to_vec())
    }

    /// Renders HTML to PDF by routing it through a temporary workspace
    /// file.
    ///
    /// Some backends only ingest large or escaping-heavy HTML reliably when
    /// it is referenced as a `file://` URL instead of inlined in the
    /// request body. This uploads the request's HTML as a workspace file,
    /// renders a clone of the request pointed at `file://<path>`, then
    /// deletes the temporary file.
    ///
    /// The caller's request is never mutated. The cleanup delete runs after
    /// the render resolves, whether it succeeded or not; cleanup failures
    /// are logged and discarded and never affect the returned result.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRequest`] when the request has no `html`.
    /// - Any error of [`create_workspace_file`](Self::create_workspace_file)
    ///   or [`create_pdf_from_request`](Self::create_pdf_from_request).
    #[instrument(skip(self, request))]
    pub async fn create_pdf_from_html_using_file_protocol(
        &self,
        request: &PdfRequest,
    ) -> Result<Vec<u8>, ClientError> {
        let Some(html) = request.html() else {
            return Err(ClientError::invalid_request("html is a required attribute"));
        };

        let workspace_file = self.create_workspace_file(html.as_bytes(), "html").await?;

        let mut modified = request.clone();
        modified.set_html(None);
        modified.set_url(Some(&format!("file://{}", workspace_file.path())));

        let rendered = self.create_pdf_from_request(&modified).await;

        // Best-effort cleanup, strictly after the render resolves. Failures
        // here must never replace the render outcome.
        match self.delete_workspace_file_async(&workspace_file).await {
            Ok(Ok(outcome)) => {
                debug!(file = %workspace_file.name(), ?outcome, "temporary workspace file cleaned up");
            }
            Ok(Err(error)) => {
                warn!(file = %workspace_file.name(), error = %error, "failed to delete temporary workspace file");
            }
            Err(error) => {
                warn!(file = %workspace_file.name(), error = %error, "workspace cleanup task failed");
            }
        }

        rendered
    }

    /// Uploads `bytes` as a transient workspace file.
    ///
    /// The filename is generated client-side as `<uuid-v4>.<extension>`;
    /// the storage path and canonical filename are assigned by the backend
    /// and read back from the upload response.
    ///
    /// # Errors
    ///
    /// - [`ClientError::BadResponse`] when the response is not a JSON array
    ///   whose first element carries `path` and `filename`.
    /// - [`ClientError::AuthFailure`] on HTTP 403.
    /// - [`ClientError::HttpStatus`] on any other error status.
    /// - [`ClientError::Timeout`] / [`ClientError::Network`] on transport
    ///   faults.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len(), extension = %file_extension))]
    pub async fn create_workspace_file(
        &self,
        bytes: &[u8],
        file_extension: &str,
    ) -> Result<WorkspaceFile, ClientError> {
        let filename = format!("{}.{file_extension}", Uuid::new_v4());
        let url = self.endpoint_url("/workspace");
        debug!(url = %url, filename = %filename, "uploading workspace file");

        let part = multipart::Part::bytes(bytes.to_vec()).file_name(filename);
        let form = multipart::Form::new().part("file", part);

        let response = self
            .send(
                self.http
                    .post(&url)
                    .header(ACCEPT, "application/json")
                    .multipart(form),
                &url,
            )
            .await?;

        let body: Value = response.json().await.map_err(|error| {
            ClientError::bad_response(format!("upload response is not valid JSON: {error}"))
        })?;
        let record = parse_upload_record(&body)?;

        info!(path = %record.path, filename = %record.filename, "workspace file created");
        Ok(WorkspaceFile::new(
            record,
            self.endpoint.clone(),
            self.token.clone(),
        ))
    }

    /// Deletes a workspace file, waiting for the backend to respond.
    ///
    /// A 404 response means the file was already gone and resolves as
    /// success.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthFailure`] on HTTP 403.
    /// - [`ClientError::BadResponse`] on any status other than 204/404,
    ///   naming the actual status.
    /// - [`ClientError::Timeout`] / [`ClientError::Network`] on transport
    ///   faults.
    #[instrument(skip(self, file), fields(file = %file.name()))]
    pub async fn delete_workspace_file(&self, file: &WorkspaceFile) -> Result<(), ClientError> {
        let url = self.endpoint_url(&format!("/workspace/{}", file.name()));
        Self::delete_inner(self.http.clone(), url, file.name().to_string())
            .await
            .map(|_| ())
    }

    /// Starts deleting a workspace file without waiting for completion.
    ///
    /// The delete runs as a spawned task; the returned handle may be
    /// awaited for the outcome or dropped, and the delete runs to
    /// completion either way. A 404 outcome resolves to
    /// [`DeleteOutcome::AlreadyAbsent`] rather than an error.
    #[instrument(skip(self, file), fields(file = %file.name()))]
    pub fn delete_workspace_file_async(
        &self,
        file: &WorkspaceFile,
    ) -> JoinHandle<Result<DeleteOutcome, ClientError>> {
        let url = self.endpoint_url(&format!("/workspace/{}", file.name()));
        tokio::spawn(Self::delete_inner(
            self.http.clone(),
            url,
            file.name().to_string(),
        ))
    }

    /// Inner delete shared by the blocking and spawned variants.
    ///
    /// Takes owned arguments so the future is `'static` and spawnable.
    async fn delete_inner(
        http: Client,
        url: String,
        filename: String,
    ) -> Result<DeleteOutcome, ClientError> {
        let response = http
            .delete(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| classify_transport(&url, error))?;

        match response.status() {
            StatusCode::NO_CONTENT => {
                debug!(file = %filename, "workspace file deleted");
                Ok(DeleteOutcome::Deleted)
            }
            StatusCode::NOT_FOUND => {
                debug!(file = %filename, "workspace file already absent");
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            StatusCode::FORBIDDEN => Err(ClientError::auth_failure(url.as_str())),
            status => Err(ClientError::bad_response(format!(
                "expected a 204 response deleting {filename}, but got {}",
                status.as_u16()
            ))),
        }
    }

    /// Sends a request and classifies the outcome.
    ///
    /// 2xx responses are returned as-is; everything else maps onto the
    /// [`ClientError`] taxonomy.
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|error| classify_transport(url, error))?;
        classify_status(url, response)
    }

    /// Composes a backend URL for `relative_path`, with the token appended
    /// when configured.
    fn endpoint_url(&self, relative_path: &str) -> String {
        generate_url(&self.endpoint, relative_path, self.token.as_deref())
    }
}

/// Maps a non-2xx response onto the error taxonomy.
fn classify_status(url: &str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::FORBIDDEN {
        return Err(ClientError::auth_failure(url));
    }
    Err(ClientError::http_status(url, status.as_u16()))
}

/// Maps a sub-HTTP transport fault onto the error taxonomy.
fn classify_transport(url: &str, error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::timeout(url)
    } else {
        ClientError::network(url, error)
    }
}

/// Extracts the uploaded-file record from the backend's response body.
///
/// The backend answers a workspace upload with a JSON array describing each
/// uploaded part; a single-part upload yields one element carrying `path`
/// and `filename`.
fn parse_upload_record(body: &Value) -> Result<WorkspaceFileRecord, ClientError> {
    let Some(entries) = body.as_array() else {
        return Err(ClientError::bad_response(
            "expected an array upload response, got something else",
        ));
    };
    let Some(first) = entries.first() else {
        return Err(ClientError::bad_response(
            "expected an upload response with one entry, but it was empty",
        ));
    };
    if first.get("path").is_none() {
        return Err(ClientError::bad_response(
            "expected the first upload entry to contain a \"path\" key, but did not find it",
        ));
    }

    serde_json::from_value(first.clone())
        .map_err(|error| ClientError::bad_response(format!("malformed upload entry: {error}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let result = BrowserlessClient::new("not a url");
        assert!(matches!(
            result,
            Err(ClientError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_new_accepts_http_endpoint() {
        assert!(BrowserlessClient::new("http://browserless:3000").is_ok());
    }

    #[test]
    fn test_parse_upload_record_happy_path() {
        let record = parse_upload_record(&json!([
            {"path": "/ws/abc.html", "filename": "abc.html"}
        ]))
        .unwrap();
        assert_eq!(record.path, "/ws/abc.html");
        assert_eq!(record.filename, "abc.html");
    }

    #[test]
    fn test_parse_upload_record_rejects_non_array() {
        let error = parse_upload_record(&json!({})).unwrap_err();
        assert!(matches!(error, ClientError::BadResponse { .. }));
        assert!(error.to_string().contains("array"), "got: {error}");
    }

    #[test]
    fn test_parse_upload_record_rejects_empty_array() {
        let error = parse_upload_record(&json!([])).unwrap_err();
        assert!(matches!(error, ClientError::BadResponse { .. }));
        assert!(error.to_string().contains("empty"), "got: {error}");
    }

    #[test]
    fn test_parse_upload_record_rejects_missing_path() {
        let error = parse_upload_record(&json!([{"filename": "abc.html"}])).unwrap_err();
        assert!(matches!(error, ClientError::BadResponse { .. }));
        assert!(error.to_string().contains("path"), "got: {error}");
    }

    #[test]
    fn test_parse_upload_record_rejects_missing_filename() {
        let error = parse_upload_record(&json!([{"path": "/ws/abc.html"}])).unwrap_err();
        assert!(matches!(error, ClientError::BadResponse { .. }));
    }

    #[test]
    fn test_parse_upload_record_ignores_trailing_entries() {
        let record = parse_upload_record(&json!([
            {"path": "/ws/a.html", "filename": "a.html"},
            {"path": "/ws/b.html", "filename": "b.html"}
        ]))
        .unwrap();
        assert_eq!(record.path, "/ws/a.html");
    }
}
