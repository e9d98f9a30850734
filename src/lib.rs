//! Browserless Client Library
//!
//! This library provides an async client SDK for a remote headless-browser
//! rendering backend ("browserless"): it converts HTML or URL content to PDF
//! and stores transient files in a server-side workspace.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`client`] - backend client, workflow orchestration and error taxonomy
//! - [`pdf`] - PDF request model and wire-payload export
//! - [`workspace`] - workspace file value object
//! - [`url`] - backend URL composition (base URL + path + auth token)
//!
//! # Example
//!
//! ```no_run
//! use browserless_client::{BrowserlessClient, PdfRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BrowserlessClient::with_token("http://browserless:3000", "secret")?;
//!
//! let mut request = PdfRequest::new();
//! request.set_html(Some("<h1>Invoice #42</h1>"));
//!
//! let pdf = client.create_pdf_from_html_using_file_protocol(&request).await?;
//! println!("rendered {} bytes", pdf.len());
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod pdf;
pub mod url;
pub mod workspace;

mod user_agent;

// Re-export commonly used types
pub use client::{BrowserlessClient, ClientError, DEFAULT_TIMEOUT_SECS, DeleteOutcome};
pub use pdf::PdfRequest;
pub use workspace::WorkspaceFile;
