//! Scripted in-memory repository shared by the poller tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use trestle_client::{ClientError, Result};
use trestle_core::domain::build::Build;
use trestle_core::domain::input::PendingInputAction;
use trestle_core::domain::job::JobPath;
use trestle_core::domain::log::LogChunk;
use trestle_core::domain::queue::QueueItem;
use trestle_poller::{BuildRepository, LogSink};

/// A recorded repository call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Trigger(String),
    GetQueueItem(u64),
    GetBuild(u64),
    GetLogs(u64),
    GetPendingInputs,
    Proceed(String),
}

/// Responses handed out in order; the last one repeats once exhausted
struct Script<T> {
    steps: Vec<std::result::Result<T, u16>>,
    next: usize,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            steps: Vec::new(),
            next: 0,
        }
    }

    fn take(&mut self, what: &str) -> Result<T> {
        let index = self.next.min(self.steps.len().saturating_sub(1));
        self.next += 1;
        match self.steps.get(index) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(status)) => Err(ClientError::api_error(*status, "scripted failure")),
            None => Err(ClientError::InvalidRequest(format!("no {} scripted", what))),
        }
    }
}

pub struct FakeRepository {
    queue: Mutex<Script<QueueItem>>,
    builds: Mutex<Script<Build>>,
    logs: Mutex<Script<LogChunk>>,
    pending: Mutex<Vec<PendingInputAction>>,
    pending_query_fails: Mutex<bool>,
    refuse_inputs: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(Script::new()),
            builds: Mutex::new(Script::new()),
            logs: Mutex::new(Script::new()),
            pending: Mutex::new(Vec::new()),
            pending_query_fails: Mutex::new(false),
            refuse_inputs: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn queue_item(self, item: QueueItem) -> Self {
        self.queue.lock().unwrap().steps.push(Ok(item));
        self
    }

    pub fn queue_failure(self, status: u16) -> Self {
        self.queue.lock().unwrap().steps.push(Err(status));
        self
    }

    pub fn build(self, build: Build) -> Self {
        self.builds.lock().unwrap().steps.push(Ok(build));
        self
    }

    pub fn build_failure(self, status: u16) -> Self {
        self.builds.lock().unwrap().steps.push(Err(status));
        self
    }

    pub fn log(self, text: &str, next_offset: u64, has_more: bool) -> Self {
        self.logs.lock().unwrap().steps.push(Ok(LogChunk {
            text: text.to_string(),
            next_offset,
            has_more,
        }));
        self
    }

    pub fn log_failure(self, status: u16) -> Self {
        self.logs.lock().unwrap().steps.push(Err(status));
        self
    }

    pub fn pending_inputs(self, ids: &[&str]) -> Self {
        self.set_pending_inputs(ids);
        self
    }

    pub fn set_pending_inputs(&self, ids: &[&str]) {
        *self.pending.lock().unwrap() = ids.iter().map(|id| PendingInputAction::new(*id)).collect();
    }

    pub fn pending_query_fails(self) -> Self {
        *self.pending_query_fails.lock().unwrap() = true;
        self
    }

    pub fn refuse_input(self, id: &str) -> Self {
        self.refuse_inputs.lock().unwrap().insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    /// Start offsets of every log query, in order
    pub fn log_offsets(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::GetLogs(start) => Some(start),
                _ => None,
            })
            .collect()
    }

    pub fn pending_ids(&self) -> Vec<String> {
        self.pending
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.id.clone())
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BuildRepository for FakeRepository {
    async fn trigger_build(&self, job: &JobPath) -> Result<u64> {
        self.record(Call::Trigger(job.to_string()));
        Ok(1)
    }

    async fn trigger_build_with_parameters(
        &self,
        job: &JobPath,
        _parameters: &HashMap<String, String>,
    ) -> Result<u64> {
        self.record(Call::Trigger(job.to_string()));
        Ok(1)
    }

    async fn get_queue_item(&self, queue_id: u64) -> Result<QueueItem> {
        self.record(Call::GetQueueItem(queue_id));
        self.queue.lock().unwrap().take("queue item")
    }

    async fn get_build(&self, _job: &JobPath, number: u64) -> Result<Build> {
        self.record(Call::GetBuild(number));
        self.builds.lock().unwrap().take("build")
    }

    async fn get_build_logs(&self, _job: &JobPath, _number: u64, start: u64) -> Result<LogChunk> {
        self.record(Call::GetLogs(start));
        self.logs.lock().unwrap().take("log chunk")
    }

    async fn get_pending_input_actions(
        &self,
        _job: &JobPath,
        _number: u64,
    ) -> Result<Vec<PendingInputAction>> {
        self.record(Call::GetPendingInputs);
        if *self.pending_query_fails.lock().unwrap() {
            return Err(ClientError::api_error(500, "scripted failure"));
        }
        Ok(self.pending.lock().unwrap().clone())
    }

    async fn proceed_input(&self, _job: &JobPath, _number: u64, input_id: &str) -> Result<()> {
        self.record(Call::Proceed(input_id.to_string()));
        if self.refuse_inputs.lock().unwrap().contains(input_id) {
            return Err(ClientError::api_error(403, "input refused"));
        }
        self.pending.lock().unwrap().retain(|a| a.id != input_id);
        Ok(())
    }
}

/// Log sink that keeps every chunk and can be told to fail
pub struct RecordingSink {
    chunks: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            chunks: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            chunks: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn chunks(&self) -> Vec<String> {
        self.chunks.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    async fn receive(&self, text: &str) -> anyhow::Result<()> {
        self.chunks.lock().unwrap().push(text.to_string());
        if self.fail {
            anyhow::bail!("sink closed");
        }
        Ok(())
    }
}
