//! Queue domain types

use serde::{Deserialize, Serialize};

/// A build request accepted by the controller but not yet assigned an executor
///
/// Transitions exactly once: either to `cancelled == true` or to an
/// executable with a non-zero number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub executable: Option<QueueExecutable>,
}

/// The build a queue item was scheduled into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueExecutable {
    #[serde(default)]
    pub number: u64,
}

impl QueueItem {
    /// A queue item still waiting for an executor
    pub fn waiting() -> Self {
        Self::default()
    }

    /// A queue item that was cancelled before it ran
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            executable: None,
        }
    }

    /// A queue item scheduled as build `number`
    pub fn scheduled(number: u64) -> Self {
        Self {
            cancelled: false,
            executable: Some(QueueExecutable { number }),
        }
    }

    /// The build number, or `0` while the item is unscheduled
    ///
    /// Zero is a sentinel and never a valid build number.
    pub fn execution_number(&self) -> u64 {
        self.executable.map(|e| e.number).unwrap_or(0)
    }
}
