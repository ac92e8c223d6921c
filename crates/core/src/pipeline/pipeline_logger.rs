/// Observer for per-request pipeline events.
///
/// Keeps use cases independent of where timings end up (the `log` crate in
/// the server, nowhere in tests).
pub trait PipelineLogger: Send {
    /// Record how long a named stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time value (e.g. number of sampled frames).
    fn metric(&mut self, name: &str, value: f64);

    /// Emit everything recorded so far. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
}

/// Collects one request's timings and metrics and writes them as a single
/// debug-level line through the `log` crate.
pub struct LogPipelineLogger {
    label: String,
    timings: Vec<(String, f64)>,
    metrics: Vec<(String, f64)>,
}

impl LogPipelineLogger {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            timings: Vec::new(),
            metrics: Vec::new(),
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let stages: Vec<String> = self
            .timings
            .iter()
            .map(|(stage, ms)| format!("{stage} {ms:.1}ms"))
            .collect();
        let metrics: Vec<String> = self
            .metrics
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();

        let total_ms: f64 = self.timings.iter().map(|(_, ms)| ms).sum();
        let mut line = format!("{} [{total_ms:.1}ms]", self.label);
        if !stages.is_empty() {
            line.push_str(&format!(" {}", stages.join(", ")));
        }
        if !metrics.is_empty() {
            line.push_str(&format!("; {}", metrics.join(", ")));
        }
        Some(line)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings.push((stage.to_string(), duration_ms));
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.push((name.to_string(), value));
    }

    fn summary(&self) {
        if let Some(line) = self.summary_string() {
            log::debug!("{line}");
        }
    }
}
