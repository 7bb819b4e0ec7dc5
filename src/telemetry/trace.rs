//! Debug side channel: checkpoints of one extraction, written as JSON lines.
//!
//! The hook is injected into the extractor; `NoopTrace` is the default and
//! `JsonlTrace` appends to a file. Nothing here can fail the extraction.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::util::time::unix_millis;

/// One instrumentation checkpoint.
#[derive(Debug, Clone)]
pub struct TracePoint<'a> {
    pub hypothesis: &'a str,
    pub location: &'a str,
    pub message: &'a str,
    pub data: Option<Value>,
}

impl<'a> TracePoint<'a> {
    pub fn new(hypothesis: &'a str, location: &'a str, message: &'a str) -> Self {
        TracePoint { hypothesis, location, message, data: None }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

pub trait TraceHook: Send + Sync {
    fn record(&self, point: &TracePoint<'_>);
}

#[derive(Debug, Default)]
pub struct NoopTrace;

impl TraceHook for NoopTrace {
    fn record(&self, _point: &TracePoint<'_>) {}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceLine<'a> {
    session_id: &'a str,
    run_id: &'a str,
    hypothesis_id: &'a str,
    location: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    timestamp: i64,
}

/// Appends one JSON object per checkpoint to `path`.
pub struct JsonlTrace {
    path: PathBuf,
    session_id: String,
    run_id: String,
    // serializes appends from concurrent extractions sharing the hook
    lock: Mutex<()>,
}

impl JsonlTrace {
    pub fn new(path: impl Into<PathBuf>, run_id: impl Into<String>) -> Self {
        JsonlTrace {
            path: path.into(),
            session_id: Uuid::new_v4().to_string(),
            run_id: run_id.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn session_id(&self) -> &str { &self.session_id }

    fn append(&self, point: &TracePoint<'_>) -> std::io::Result<()> {
        let line = TraceLine {
            session_id: &self.session_id,
            run_id: &self.run_id,
            hypothesis_id: point.hypothesis,
            location: point.location,
            message: point.message,
            data: point.data.as_ref(),
            timestamp: unix_millis(),
        };
        let mut buf = serde_json::to_vec(&line)?;
        buf.push(b'\n');
        let _g = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut f = OpenOptions::new().create(true).append(true).open(&self.path)?;
        f.write_all(&buf)
    }
}

impl TraceHook for JsonlTrace {
    fn record(&self, point: &TracePoint<'_>) {
        if let Err(e) = self.append(point) {
            tracing::debug!(path = %self.path.display(), error = %e, "trace write skipped");
        }
    }
}
