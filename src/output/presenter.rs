use std::io::{self, Write};

use serde_json::Value;

pub trait Presenter: Send + Sync {
    fn emit(&self, record: &Value, w: &mut dyn Write) -> io::Result<()>;
}

/// One JSON document per emit, newline terminated. Non-ASCII is written as-is.
pub struct JsonPresenter { pub pretty: bool }

impl Presenter for JsonPresenter {
    fn emit(&self, record: &Value, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, record).map_err(to_io)? } else { serde_json::to_writer(&mut *w, record).map_err(to_io)? }
        writeln!(w)?;
        w.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }
