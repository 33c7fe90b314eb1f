//! Console text sinks

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tracing::info;

/// Receives console text as the build poller reads it
///
/// Called once per iteration with the text that appeared since the last
/// call, which may be empty. Returning an error aborts the poll.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn receive(&self, text: &str) -> Result<()>;
}

/// Writes each non-empty chunk, followed by a newline, to a writer
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| anyhow!("log writer lock poisoned"))
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send> LogSink for WriterSink<W> {
    async fn receive(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("log writer lock poisoned"))?;
        writeln!(writer, "{}", text)?;
        writer.flush()?;
        Ok(())
    }
}

/// Emits every console line as a `tracing` event
pub struct TracingSink {
    job: String,
}

impl TracingSink {
    pub fn new(job: impl Into<String>) -> Self {
        Self { job: job.into() }
    }
}

#[async_trait]
impl LogSink for TracingSink {
    async fn receive(&self, text: &str) -> Result<()> {
        for line in text.lines() {
            info!(target: "trestle::console", job = %self.job, "{}", line);
        }
        Ok(())
    }
}
