use std::io::Write;

use anyhow::Result;
use serde::Serialize;

pub mod presenter;

use presenter::{JsonPresenter, Presenter};

/// Record for stdout: pretty-printed.
pub fn print_record<T: Serialize>(record: &T, w: &mut dyn Write) -> Result<()> {
    emit(&JsonPresenter { pretty: true }, record, w)
}

/// Record for stderr: compact, single line.
pub fn print_error_line<T: Serialize>(record: &T, w: &mut dyn Write) -> Result<()> {
    emit(&JsonPresenter { pretty: false }, record, w)
}

fn emit<T: Serialize>(presenter: &dyn Presenter, record: &T, w: &mut dyn Write) -> Result<()> {
    let value = serde_json::to_value(record)?;
    presenter.emit(&value, w)?;
    Ok(())
}
