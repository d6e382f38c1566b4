use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_CAPACITY: usize = 6;

/// Bounded, append-only debug log owned by the dashboard. The most recent
/// messages stay available for the `log` command while every line goes to
/// the file sink with a timestamp. File append failures are not fatal.
pub struct OutputLog {
    path: PathBuf,
    buffer: VecDeque<String>,
    capacity: usize,
}

impl OutputLog {
    pub fn new(path: PathBuf, capacity: usize) -> Self {
        Self {
            path,
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.buffer.push_back(message.clone());
        while self.buffer.len() > self.capacity {
            self.buffer.pop_front();
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{timestamp}] {message}\n");
        if let Err(error) = self.write_line(&line) {
            warn!(%error, path = %self.path.display(), "failed to append to the debug log");
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }

    /// The retained messages, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.buffer.iter().map(String::as_str)
    }
}
