//! Bounded in-memory store for captured log lines.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::LogSink;

/// Keeps the most recent `capacity` lines. Cheap to clone; clones share storage.
#[derive(Clone, Debug)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, line: String) {
        // A poisoned lock only means a writer panicked mid-push; keep logging.
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A sink that appends to this buffer.
    pub fn sink(&self) -> LogSink {
        let buffer = self.clone();
        Arc::new(move |line| buffer.push(line))
    }
}
