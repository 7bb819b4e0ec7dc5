use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use serde_json::json;
use url::Url;

use crate::telemetry::{self};
use crate::telemetry::ops::extract::Phase as ExtractPhase;
use crate::telemetry::trace::{NoopTrace, TraceHook, TracePoint};
use crate::util::time::local_timestamp;

pub mod config;
pub mod error;
pub mod types;
mod fetch;
mod normalize;
mod parse;

pub use config::ExtractOptions;
pub use error::ExtractError;
pub use types::{ErrorRecord, Outcome, PageRecord};

/// Fetches one page and turns it into a `PageRecord`, or an `ErrorRecord`
/// describing which of the failure categories stopped it.
pub struct PageExtractor {
    // build failures surface as an error record on extract
    client: Result<Client, ExtractError>,
    trace: Arc<dyn TraceHook>,
}

impl PageExtractor {
    pub fn new(opts: &ExtractOptions) -> Self {
        PageExtractor { client: fetch::build_client(opts), trace: Arc::new(NoopTrace) }
    }

    pub fn with_trace(mut self, trace: Arc<dyn TraceHook>) -> Self {
        self.trace = trace;
        self
    }

    pub async fn extract(&self, raw_url: &str) -> Outcome {
        let log = telemetry::extract();
        let _g = log.root_span_kv([("input", raw_url.to_string())]).entered();

        let url = {
            let _s = log.span(&ExtractPhase::Normalize).entered();
            normalize::normalize_url(raw_url)
        };
        self.trace.record(&TracePoint::new("normalize", "extract:normalized", "input normalized")
            .with_data(json!({ "input": raw_url, "url": url })));

        match self.run(&url).await {
            Ok(page) => {
                log.page_summary(&page.url, page.status_code, page.links.len(), page.content.chars().count());
                self.trace.record(&TracePoint::new("parse", "extract:fields", "fields extracted").with_data(json!({
                    "title_chars": page.title.chars().count(),
                    "content_chars": page.content.chars().count(),
                    "links": page.links.len(),
                    "has_meta_description": !page.meta_description.is_empty(),
                })));
                Outcome::Page(page)
            }
            Err(err) => {
                log.failure(&url, err.kind(), &err.to_string());
                self.trace.record(&TracePoint::new("classify", "extract:failed", "failure classified")
                    .with_data(json!({ "kind": err.kind(), "error": err.to_string() })));
                Outcome::Failed(ErrorRecord::new(&err, Some(&url)))
            }
        }
    }

    async fn run(&self, url: &str) -> Result<PageRecord, ExtractError> {
        let log = telemetry::extract();
        let parsed = Url::parse(url).map_err(|e| ExtractError::Unexpected(e.to_string()))?;
        let client = self.client.as_ref().map_err(Clone::clone)?;

        let fetched = {
            let _s = log.span_kv(&ExtractPhase::Fetch, [("url", url.to_string())]).entered();
            self.trace.record(&TracePoint::new("fetch", "extract:request", "sending GET"));
            let res = fetch::fetch_page(client, &parsed).await;
            if let Err(ExtractError::HttpStatus(code)) = &res {
                self.trace.record(&TracePoint::new("fetch", "extract:response", "non-success status")
                    .with_data(json!({ "status": code })));
            }
            res?
        };
        self.trace.record(&TracePoint::new("fetch", "extract:response", "response received")
            .with_data(json!({ "status": fetched.status, "body_bytes": fetched.body.len() })));

        let fields = {
            let _s = log.span(&ExtractPhase::Parse).entered();
            parse::extract_fields(&fetched.body, &parsed)
        };

        Ok(PageRecord {
            url: url.to_string(),
            title: fields.title,
            domain: normalize::network_location(&parsed),
            content: fields.content,
            links: fields.links,
            meta_description: fields.meta_description,
            status_code: fetched.status,
            timestamp: Some(local_timestamp()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Mutex;
    use std::time::Duration;
    use serde_json::Value;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PAGE: &str = r#"<!doctype html>
<html><head>
  <title>  Olá Mundo  </title>
  <meta name="description" content="Página de teste">
</head><body>
  <h1>Bem-vindo</h1>
  <p>Texto <b>visível</b>.</p>
  <script>console.log("hidden")</script>
  <a href="/sobre">Sobre</a>
  <a href="contato.html">Contato</a>
  <a href="https://outro.example/x">Fora</a>
</body></html>"#;

    // Serves the same canned response to every connection.
    async fn serve(status_line: &'static str, body: &'static str, delay: Duration) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut sock, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = sock.read(&mut buf).await;
                    tokio::time::sleep(delay).await;
                    let resp = format!(
                        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status_line, body.len(), body
                    );
                    let _ = sock.write_all(resp.as_bytes()).await;
                    let _ = sock.shutdown().await;
                });
            }
        });
        addr
    }

    fn extractor() -> PageExtractor {
        PageExtractor::new(&ExtractOptions::default())
    }

    #[derive(Default)]
    struct Recorder { locations: Mutex<Vec<String>> }

    impl TraceHook for Recorder {
        fn record(&self, point: &TracePoint<'_>) {
            self.locations.lock().unwrap().push(point.location.to_string());
        }
    }

    #[tokio::test]
    async fn extracts_page_fields() {
        let addr = serve("200 OK", PAGE, Duration::ZERO).await;
        let url = format!("http://{}/docs/index.html", addr);
        let out = extractor().extract(&url).await;
        let page = out.page().expect("page record");

        assert_eq!(page.url, url);
        assert_eq!(page.title, "Olá Mundo");
        assert_eq!(page.domain, addr.to_string());
        assert_eq!(page.meta_description, "Página de teste");
        assert_eq!(page.status_code, 200);
        assert!(page.content.contains("Bem-vindo Texto visível ."));
        assert!(!page.content.contains("hidden"));
        assert_eq!(page.links, vec![
            format!("http://{}/sobre", addr),
            format!("http://{}/docs/contato.html", addr),
            "https://outro.example/x".to_string(),
        ]);
        assert!(page.timestamp.is_some());

        let v: Value = serde_json::to_value(&out).unwrap();
        assert!(v.get("error").is_none());
    }

    #[tokio::test]
    async fn http_404_becomes_error_record() {
        let addr = serve("404 Not Found", "<h1>nope</h1>", Duration::ZERO).await;
        let url = format!("http://{}/missing", addr);
        let out = extractor().extract(&url).await;
        let v: Value = serde_json::to_value(&out).unwrap();
        assert_eq!(v, json!({ "error": "HTTP Error: 404", "url": url }));
    }

    #[tokio::test]
    async fn server_error_status_is_http_error() {
        let addr = serve("503 Service Unavailable", "", Duration::ZERO).await;
        let out = extractor().extract(&format!("http://{}/", addr)).await;
        assert_eq!(out.failure().unwrap().error, "HTTP Error: 503");
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let addr = serve("200 OK", PAGE, Duration::from_secs(5)).await;
        let url = format!("http://{}/", addr);
        let opts = ExtractOptions::default().with_timeout(Duration::from_millis(200));
        let out = PageExtractor::new(&opts).extract(&url).await;
        let v: Value = serde_json::to_value(&out).unwrap();
        assert_eq!(v, json!({ "error": "Timeout: Website não respondeu em 30 segundos", "url": url }));
    }

    #[tokio::test]
    async fn scheme_less_input_is_fetched_over_https() {
        let addr = serve("200 OK", PAGE, Duration::from_secs(5)).await;
        let opts = ExtractOptions::default().with_timeout(Duration::from_millis(200));
        let out = PageExtractor::new(&opts).extract(&format!("{}/x", addr)).await;
        let err = out.failure().expect("error record");
        assert_eq!(err.url.as_deref(), Some(format!("https://{}/x", addr).as_str()));
    }

    #[tokio::test]
    async fn invalid_user_agent_becomes_unexpected_error() {
        let opts = ExtractOptions::from_user_agent(Some("bad\nagent".into()));
        let out = PageExtractor::new(&opts).extract("example.com").await;
        let v: Value = serde_json::to_value(&out).unwrap();
        assert!(v["error"].as_str().unwrap().starts_with("Erro inesperado: "), "got {}", v);
        assert_eq!(v["url"], json!("https://example.com"));
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = format!("http://{}/", addr);
        let out = extractor().extract(&url).await;
        let err = out.failure().expect("error record");
        assert!(err.error.starts_with("Erro de rede: "), "got {}", err.error);
        assert_eq!(err.url.as_deref(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn unparseable_url_is_unexpected_error() {
        let out = extractor().extract("http://exa mple.com/").await;
        let err = out.failure().expect("error record");
        assert!(err.error.starts_with("Erro inesperado: "), "got {}", err.error);
        assert_eq!(err.url.as_deref(), Some("http://exa mple.com/"));
    }

    #[tokio::test]
    async fn repeated_runs_are_identical_apart_from_timestamp() {
        let addr = serve("200 OK", PAGE, Duration::ZERO).await;
        let url = format!("http://{}/", addr);
        let ex = extractor();
        let mut a = ex.extract(&url).await.page().cloned().unwrap();
        let mut b = ex.extract(&url).await.page().cloned().unwrap();
        a.timestamp = None;
        b.timestamp = None;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn trace_hook_sees_checkpoints_without_changing_result() {
        let addr = serve("200 OK", PAGE, Duration::ZERO).await;
        let url = format!("http://{}/", addr);
        let recorder = Arc::new(Recorder::default());
        let traced = extractor().with_trace(recorder.clone());

        let mut with_hook = traced.extract(&url).await.page().cloned().unwrap();
        let mut without = extractor().extract(&url).await.page().cloned().unwrap();
        with_hook.timestamp = None;
        without.timestamp = None;
        assert_eq!(with_hook, without);

        let seen = recorder.locations.lock().unwrap().clone();
        assert_eq!(seen, vec![
            "extract:normalized",
            "extract:request",
            "extract:response",
            "extract:fields",
        ]);
    }

    #[tokio::test]
    async fn trace_hook_records_failure_classification() {
        let addr = serve("404 Not Found", "", Duration::ZERO).await;
        let recorder = Arc::new(Recorder::default());
        let out = extractor().with_trace(recorder.clone()).extract(&format!("http://{}/", addr)).await;
        assert!(out.failure().is_some());
        let seen = recorder.locations.lock().unwrap().clone();
        assert_eq!(seen.last().map(String::as_str), Some("extract:failed"));
    }
}
