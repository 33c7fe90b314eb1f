//! Capabilities invoked by the build poller mid-loop
//!
//! A capability failure aborts the poll; nothing it already did is undone.

mod input;
mod logs;

pub use input::{AutoProceed, IgnoreInput, InputResolver};
pub use logs::{LogSink, TracingSink, WriterSink};
