//! The PDF request model: typed accessors over context options, a
//! renderer-options map, and the sanitized wire-payload export.

use serde_json::{Map, Value};

/// Context option key for the URL to load.
const URL_KEY: &str = "url";

/// Context option key for inline HTML content.
const HTML_KEY: &str = "html";

/// Context option key for CSS media emulation.
const EMULATE_MEDIA_KEY: &str = "emulateMedia";

/// Media type emulated when none is set explicitly.
const DEFAULT_EMULATED_MEDIA: &str = "print";

/// Placeholder for explicitly-empty header/footer templates.
///
/// The backend rejects an empty `headerTemplate`/`footerTemplate` string,
/// but an empty template is how callers suppress the backend's default
/// header/footer. A bare span renders as nothing while satisfying the
/// backend's non-empty requirement.
const EMPTY_TEMPLATE_PLACEHOLDER: &str = "<span></span>";

/// A request to the backend's PDF-creation endpoint.
///
/// The model itself does not enforce that `url` and `html` are mutually
/// exclusive; [`BrowserlessClient::create_pdf_from_request`] validates that
/// at submission time.
///
/// [`BrowserlessClient::create_pdf_from_request`]: crate::client::BrowserlessClient::create_pdf_from_request
#[derive(Debug, Clone, Default)]
pub struct PdfRequest {
    context_options: Map<String, Value>,
    renderer_options: Map<String, Value>,
}

impl PdfRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the URL to render, when set.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.context_options.get(URL_KEY).and_then(Value::as_str)
    }

    /// Sets or clears the URL to render.
    ///
    /// `None` removes the key from the context options entirely,
    /// distinguishing "not set" from "set to an empty string".
    pub fn set_url(&mut self, value: Option<&str>) -> &mut Self {
        self.set_or_remove(URL_KEY, value)
    }

    /// Returns the inline HTML content, when set.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.context_options.get(HTML_KEY).and_then(Value::as_str)
    }

    /// Sets or clears the inline HTML content.
    ///
    /// `None` removes the key from the context options entirely.
    pub fn set_html(&mut self, value: Option<&str>) -> &mut Self {
        self.set_or_remove(HTML_KEY, value)
    }

    /// Returns the emulated CSS media type, defaulting to `"print"`.
    #[must_use]
    pub fn emulated_media(&self) -> &str {
        self.context_options
            .get(EMULATE_MEDIA_KEY)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_EMULATED_MEDIA)
    }

    /// Sets the emulated CSS media type.
    pub fn set_emulated_media(&mut self, value: &str) -> &mut Self {
        self.set_context_option(EMULATE_MEDIA_KEY, Value::String(value.to_string()))
    }

    /// Replaces the renderer-options map wholesale (no merge with the
    /// previous value). These options are forwarded verbatim to the
    /// backend's PDF engine.
    pub fn set_options(&mut self, options: Map<String, Value>) -> &mut Self {
        self.renderer_options = options;
        self
    }

    /// Returns a context option by key.
    #[must_use]
    pub fn context_option(&self, key: &str) -> Option<&Value> {
        self.context_options.get(key)
    }

    /// Sets a context option not covered by the typed accessors.
    ///
    /// Unrecognized keys are passed through to the backend opaquely.
    pub fn set_context_option(&mut self, key: &str, value: Value) -> &mut Self {
        self.context_options.insert(key.to_string(), value);
        self
    }

    /// Produces the wire payload: the context options merged with a single
    /// `options` key holding the sanitized renderer options.
    ///
    /// Sanitization replaces a `footerTemplate` or `headerTemplate` that is
    /// `null` or `""` with the placeholder `<span></span>`.
    /// The payload is derived fresh on every call; the stored options are
    /// never mutated, so repeated exports yield identical results.
    #[must_use]
    pub fn export(&self) -> Map<String, Value> {
        let mut payload = self.context_options.clone();

        let mut options = self.renderer_options.clone();
        sanitize_template(&mut options, "footerTemplate");
        sanitize_template(&mut options, "headerTemplate");

        payload.insert("options".to_string(), Value::Object(options));
        payload
    }

    fn set_or_remove(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => {
                self.context_options
                    .insert(key.to_string(), Value::String(value.to_string()));
            }
            None => {
                self.context_options.remove(key);
            }
        }
        self
    }
}

/// Replaces an explicitly-empty template value with the placeholder span.
///
/// Only `null` and `""` are rewritten; any other value passes through
/// unchanged. Idempotent.
fn sanitize_template(options: &mut Map<String, Value>, key: &str) {
    if let Some(value) = options.get(key)
        && (value.is_null() || value.as_str() == Some(""))
    {
        options.insert(
            key.to_string(),
            Value::String(EMPTY_TEMPLATE_PLACEHOLDER.to_string()),
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_merges_context_options_with_options_key() {
        let mut request = PdfRequest::new();
        request.set_url(Some("https://example.com"));

        let mut options = Map::new();
        options.insert("format".to_string(), json!("A4"));
        request.set_options(options);

        let payload = request.export();
        assert_eq!(payload["url"], json!("https://example.com"));
        assert_eq!(payload["options"], json!({"format": "A4"}));
    }

    #[test]
    fn test_export_is_idempotent() {
        let mut request = PdfRequest::new();
        request.set_html(Some("<h1>x</h1>"));

        let mut options = Map::new();
        options.insert("footerTemplate".to_string(), json!(""));
        options.insert("headerTemplate".to_string(), Value::Null);
        request.set_options(options);

        let first = request.export();
        let second = request.export();
        assert_eq!(first, second, "successive exports must be identical");
    }

    #[test]
    fn test_export_does_not_mutate_stored_options() {
        let mut request = PdfRequest::new();
        let mut options = Map::new();
        options.insert("footerTemplate".to_string(), json!(""));
        request.set_options(options);

        let payload = request.export();
        assert_eq!(payload["options"]["footerTemplate"], json!("<span></span>"));

        // The sanitized value is derived at export time only; a later export
        // must start again from the stored empty string.
        let payload = request.export();
        assert_eq!(payload["options"]["footerTemplate"], json!("<span></span>"));
    }

    #[test]
    fn test_export_sanitizes_empty_footer_template() {
        for empty in [json!(""), Value::Null] {
            let mut request = PdfRequest::new();
            let mut options = Map::new();
            options.insert("footerTemplate".to_string(), empty);
            request.set_options(options);

            let payload = request.export();
            assert_eq!(payload["options"]["footerTemplate"], json!("<span></span>"));
        }
    }

    #[test]
    fn test_export_sanitizes_empty_header_template() {
        for empty in [json!(""), Value::Null] {
            let mut request = PdfRequest::new();
            let mut options = Map::new();
            options.insert("headerTemplate".to_string(), empty);
            request.set_options(options);

            let payload = request.export();
            assert_eq!(payload["options"]["headerTemplate"], json!("<span></span>"));
        }
    }

    #[test]
    fn test_export_passes_non_empty_templates_through() {
        let mut request = PdfRequest::new();
        let mut options = Map::new();
        options.insert("footerTemplate".to_string(), json!("<b>page</b>"));
        options.insert("headerTemplate".to_string(), json!(" "));
        request.set_options(options);

        let payload = request.export();
        assert_eq!(payload["options"]["footerTemplate"], json!("<b>page</b>"));
        assert_eq!(payload["options"]["headerTemplate"], json!(" "));
    }

    #[test]
    fn test_export_without_templates_leaves_options_untouched() {
        let mut request = PdfRequest::new();
        let mut options = Map::new();
        options.insert("printBackground".to_string(), json!(true));
        request.set_options(options);

        let payload = request.export();
        assert_eq!(payload["options"], json!({"printBackground": true}));
    }

    #[test]
    fn test_set_url_none_removes_key_entirely() {
        let mut request = PdfRequest::new();
        request.set_url(Some("x"));
        assert_eq!(request.url(), Some("x"));

        request.set_url(None);
        assert_eq!(request.url(), None);

        let payload = request.export();
        assert!(
            !payload.contains_key("url"),
            "cleared url must be absent, not null: {payload:?}"
        );
    }

    #[test]
    fn test_set_html_none_removes_key_entirely() {
        let mut request = PdfRequest::new();
        request.set_html(Some("<p>hi</p>"));
        request.set_html(None);

        assert_eq!(request.html(), None);
        assert!(!request.export().contains_key("html"));
    }

    #[test]
    fn test_empty_string_url_is_set_not_absent() {
        let mut request = PdfRequest::new();
        request.set_url(Some(""));
        assert_eq!(request.url(), Some(""));
        assert!(request.export().contains_key("url"));
    }

    #[test]
    fn test_emulated_media_defaults_to_print() {
        let request = PdfRequest::new();
        assert_eq!(request.emulated_media(), "print");
    }

    #[test]
    fn test_set_emulated_media() {
        let mut request = PdfRequest::new();
        request.set_emulated_media("screen");
        assert_eq!(request.emulated_media(), "screen");
        assert_eq!(request.export()["emulateMedia"], json!("screen"));
    }

    #[test]
    fn test_set_options_replaces_previous_map() {
        let mut request = PdfRequest::new();
        let mut first = Map::new();
        first.insert("format".to_string(), json!("A4"));
        request.set_options(first);

        let mut second = Map::new();
        second.insert("landscape".to_string(), json!(true));
        request.set_options(second);

        let payload = request.export();
        assert_eq!(payload["options"], json!({"landscape": true}));
    }

    #[test]
    fn test_context_option_escape_hatch_passes_through() {
        let mut request = PdfRequest::new();
        request.set_context_option("gotoOptions", json!({"waitUntil": "networkidle2"}));

        assert_eq!(
            request.context_option("gotoOptions"),
            Some(&json!({"waitUntil": "networkidle2"}))
        );
        assert_eq!(
            request.export()["gotoOptions"],
            json!({"waitUntil": "networkidle2"})
        );
    }

    #[test]
    fn test_clone_is_independent_of_original() {
        let mut original = PdfRequest::new();
        original.set_html(Some("<h1>x</h1>"));

        let mut copy = original.clone();
        copy.set_html(None);
        copy.set_url(Some("file:///ws/u.html"));

        assert_eq!(original.html(), Some("<h1>x</h1>"));
        assert_eq!(original.url(), None);
        assert_eq!(copy.url(), Some("file:///ws/u.html"));
    }
}
