use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated by the board while it processes pointer events.
#[derive(Debug, Default, Clone)]
pub struct BoardMetrics {
    events: u64,
    compactions: u64,
    drops: u64,
    resizes: u64,
    rejected: u64,
}

impl BoardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_compaction(&mut self) {
        self.compactions = self.compactions.saturating_add(1);
    }

    pub fn record_drop(&mut self) {
        self.drops = self.drops.saturating_add(1);
    }

    pub fn record_resize(&mut self) {
        self.resizes = self.resizes.saturating_add(1);
    }

    pub fn record_rejected(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            events: self.events,
            compactions: self.compactions,
            drops: self.drops,
            resizes: self.resizes,
            rejected: self.rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub events: u64,
    pub compactions: u64,
    pub drops: u64,
    pub resizes: u64,
    pub rejected: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "board_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("events".to_string(), json!(self.events));
        map.insert("compactions".to_string(), json!(self.compactions));
        map.insert("drops".to_string(), json!(self.drops));
        map.insert("resizes".to_string(), json!(self.resizes));
        map.insert("rejected".to_string(), json!(self.rejected));
        map
    }
}
