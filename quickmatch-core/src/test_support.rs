use crate::traits::Connection;
use std::sync::Mutex;

/// Install a test subscriber so `RUST_LOG=debug cargo test` shows traces
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Transport fake that records every send/join/leave for assertions
#[derive(Debug, Default)]
pub struct RecordingConnection {
    sent: Mutex<Vec<(String, serde_json::Value)>>,
    joined: Mutex<Vec<String>>,
    left: Mutex<Vec<String>>,
}

impl RecordingConnection {
    pub fn sent(&self) -> Vec<(String, serde_json::Value)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn joined(&self) -> Vec<String> {
        self.joined.lock().unwrap().clone()
    }

    pub fn left(&self) -> Vec<String> {
        self.left.lock().unwrap().clone()
    }

    /// Currently subscribed: joined more often than left
    pub fn is_in(&self, channel: &str) -> bool {
        let joins = self.joined().iter().filter(|c| *c == channel).count();
        let leaves = self.left().iter().filter(|c| *c == channel).count();
        joins > leaves
    }

    pub fn received(&self, event: &str) -> bool {
        self.sent().iter().any(|(name, _)| name == event)
    }
}

impl Connection for RecordingConnection {
    fn send(&self, event: &str, payload: serde_json::Value) {
        self.sent.lock().unwrap().push((event.to_string(), payload));
    }

    fn join(&self, channel: &str) {
        self.joined.lock().unwrap().push(channel.to_string());
    }

    fn leave(&self, channel: &str) {
        self.left.lock().unwrap().push(channel.to_string());
    }
}
