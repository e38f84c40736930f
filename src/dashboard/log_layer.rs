use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use super::app::LogEntry;

/// Maximum number of log entries to keep in buffer
const DEFAULT_BUFFER_CAPACITY: usize = 1000;

/// Tracing layer feeding the dashboard's log panel.
///
/// Takes the place of a console: backend and storage failures end up here.
pub struct LogPanelLayer {
    buffer: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
    min_level: Level,
}

impl LogPanelLayer {
    pub fn new(buffer: Arc<Mutex<VecDeque<LogEntry>>>) -> Self {
        Self {
            buffer,
            capacity: DEFAULT_BUFFER_CAPACITY,
            min_level: Level::INFO,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }
}

impl<S> Layer<S> for LogPanelLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.level() > &self.min_level {
            return;
        }

        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let entry = LogEntry {
            timestamp: chrono::Utc::now(),
            level: *metadata.level(),
            message: fields.finish(),
        };

        // Skip the entry rather than block while the UI holds the lock
        if let Ok(mut buffer) = self.buffer.try_lock() {
            while buffer.len() >= self.capacity {
                buffer.pop_front();
            }
            buffer.push_back(entry);
        }
    }
}

/// Collects the message plus `key=value` pairs for the remaining fields
#[derive(Default)]
struct FieldCollector {
    message: String,
    extra: Vec<String>,
}

impl FieldCollector {
    fn finish(self) -> String {
        if self.extra.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.extra.join(" ")
        } else {
            format!("{} {}", self.message, self.extra.join(" "))
        }
    }
}

impl tracing::field::Visit for FieldCollector {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.extra.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.extra.push(format!("{}={}", field.name(), value));
        }
    }
}
