//! Workspace file value object.
//!
//! A workspace file is a transient file stored on the rendering backend,
//! addressable by its server-relative `path` and deletable by `filename`.
//! Both identifiers are assigned by the backend's upload response, not the
//! caller; the backend is the sole source of truth for the file's
//! existence.

use serde::Deserialize;

use crate::url::generate_url;

/// Backend-assigned identity of an uploaded workspace file.
///
/// Deserialized from element 0 of the upload response. Records missing
/// `path` or `filename` are rejected during upload, so accessors on the
/// constructed [`WorkspaceFile`] are infallible. Extra keys in the record
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WorkspaceFileRecord {
    pub path: String,
    pub filename: String,
}

/// A file stored in the backend's workspace.
///
/// Created only as the return value of
/// [`BrowserlessClient::create_workspace_file`]; immutable after
/// construction.
///
/// [`BrowserlessClient::create_workspace_file`]: crate::client::BrowserlessClient::create_workspace_file
#[derive(Debug, Clone)]
pub struct WorkspaceFile {
    record: WorkspaceFileRecord,
    base_url: String,
    token: Option<String>,
}

impl WorkspaceFile {
    pub(crate) fn new(
        record: WorkspaceFileRecord,
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            record,
            base_url: base_url.into(),
            token,
        }
    }

    /// Server-relative storage path (the target of `file://` references).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.record.path
    }

    /// Backend filename, used in delete and lookup calls.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.filename
    }

    /// Fully-qualified retrieval URL for the file, embedding the auth token
    /// when the client was configured with one.
    #[must_use]
    pub fn full_url(&self) -> String {
        generate_url(&self.base_url, &self.record.path, self.token.as_deref())
    }
}
