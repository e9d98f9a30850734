//! PDF request model for the backend's `/pdf` endpoint.
//!
//! A [`PdfRequest`] carries two layers of options:
//!
//! - *context options* sit at the top level of the wire payload and steer
//!   the backend's page-loading logic (`url`, `html`, `emulateMedia`, ...);
//! - *renderer options* are nested under a single `options` key and
//!   forwarded verbatim to the backend's PDF engine (format, margins,
//!   header/footer templates, background printing, ...).
//!
//! # Example
//!
//! ```
//! use browserless_client::PdfRequest;
//! use serde_json::{Map, json};
//!
//! let mut options = Map::new();
//! options.insert("format".to_string(), json!("A4"));
//! options.insert("footerTemplate".to_string(), json!(""));
//!
//! let mut request = PdfRequest::new();
//! request.set_url(Some("https://example.com")).set_options(options);
//!
//! let payload = request.export();
//! assert_eq!(payload["url"], json!("https://example.com"));
//! assert_eq!(payload["options"]["footerTemplate"], json!("<span></span>"));
//! ```

mod request;

pub use request::PdfRequest;
