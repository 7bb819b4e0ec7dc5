pub mod config;
pub mod ctx;
pub mod ops;
pub mod trace;

use ctx::LogCtx;

pub fn extract() -> LogCtx<ops::extract::Extract> { LogCtx::new() }
