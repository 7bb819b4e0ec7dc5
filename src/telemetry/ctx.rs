use std::marker::PhantomData;
use tracing::{info, debug, warn, Span};

use super::config;

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    pub fn new() -> Self { LogCtx { json: config::logs_are_json(), _marker: PhantomData } }

    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = O::root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            debug!(op = %self.op_name(), "start");
        } else {
            debug!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        let details = kv_to_string(fields);
        if !details.is_empty() {
            debug!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start");
        }
        span
    }
}

impl<O: OpMarker> Default for LogCtx<O> {
    fn default() -> Self { Self::new() }
}

// Extract-specific helpers on the typed context
impl LogCtx<crate::telemetry::ops::extract::Extract> {
    pub fn page_summary(&self, url: &str, status: u16, links: usize, content_chars: usize) {
        if self.json { info!(op = %self.op_name(), url, status, links, content_chars, "page_summary"); }
        else { info!("✅ {} — status={} links={} content_chars={}", url, status, links, content_chars); }
    }

    pub fn failure(&self, url: &str, kind: &str, message: &str) {
        if self.json { warn!(op = %self.op_name(), url, kind, message, "extract_failed"); }
        else { warn!("❌ {} — {} ({})", url, message, kind); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
