use serde::Serialize;

use super::error::ExtractError;

/// Fields pulled out of a successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub domain: String,
    pub content: String,
    pub links: Vec<String>,
    pub meta_description: String,
    pub status_code: u16,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ErrorRecord {
    pub fn new(err: &ExtractError, url: Option<&str>) -> Self {
        ErrorRecord { error: err.to_string(), url: url.map(str::to_string) }
    }
}

/// Exactly one of these is produced per extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Page(PageRecord),
    Failed(ErrorRecord),
}

#[cfg(test)]
impl Outcome {
    pub fn page(&self) -> Option<&PageRecord> {
        match self { Outcome::Page(p) => Some(p), Outcome::Failed(_) => None }
    }

    pub fn failure(&self) -> Option<&ErrorRecord> {
        match self { Outcome::Failed(e) => Some(e), Outcome::Page(_) => None }
    }
}

// Page fields that come from the document itself, before the fetch context is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    pub title: String,
    pub content: String,
    pub links: Vec<String>,
    pub meta_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn page_record_never_has_error_key() {
        let page = Outcome::Page(PageRecord {
            url: "https://example.com".into(),
            title: "Example".into(),
            domain: "example.com".into(),
            content: "hello".into(),
            links: vec!["https://example.com/a".into()],
            meta_description: String::new(),
            status_code: 200,
            timestamp: Some("2024-01-02 03:04:05".into()),
        });
        let v: Value = serde_json::to_value(&page).unwrap();
        assert!(v.get("error").is_none());
        assert_eq!(v["meta_description"], json!(""));
        assert_eq!(v["status_code"], json!(200));
    }

    #[test]
    fn error_record_with_url() {
        let rec = Outcome::Failed(ErrorRecord::new(&ExtractError::HttpStatus(404), Some("https://x.test")));
        let v: Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(v, json!({"error": "HTTP Error: 404", "url": "https://x.test"}));
    }

    #[test]
    fn missing_input_record_omits_url() {
        let rec = ErrorRecord::new(&ExtractError::missing_input(), None);
        let s = serde_json::to_string(&rec).unwrap();
        assert!(!s.contains("\"url\""));
        assert!(s.contains("URL não fornecida"));
    }
}
