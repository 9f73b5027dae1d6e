use std::collections::BTreeMap;
use std::time::Instant;

/// Cross-cutting observer for frame-processing events.
///
/// Keeps the dispatcher independent of where diagnostics go (log crate,
/// a GUI status line, nowhere).
pub trait PipelineLogger: Send {
    /// Called once per frame that reached the detector.
    fn frame_processed(&mut self, index: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces in view).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events. Used by tests and embedders with their own telemetry.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn frame_processed(&mut self, _index: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

#[derive(Debug, Default)]
struct Series {
    count: usize,
    total: f64,
    max: f64,
}

impl Series {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
        self.max = self.max.max(value);
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Logs throttled progress through the `log` crate and aggregates
/// per-stage timings for an end-of-run summary.
pub struct StdoutPipelineLogger {
    log_every: usize,
    frames: usize,
    timings: BTreeMap<String, Series>,
    metrics: BTreeMap<String, Series>,
    started: Instant,
}

impl StdoutPipelineLogger {
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
            frames: 0,
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            started: Instant::now(),
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn mean_timing(&self, stage: &str) -> Option<f64> {
        self.timings.get(stage).map(Series::mean)
    }

    pub fn mean_metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).map(Series::mean)
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 && self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.started.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Overlay summary ({} frames, {elapsed_s:.1}s):",
            self.frames
        )];

        for (stage, series) in &self.timings {
            lines.push(format!(
                "  {stage:10}: avg {:6.2}ms  max {:6.2}ms",
                series.mean(),
                series.max
            ));
        }
        for (name, series) in &self.metrics {
            lines.push(format!("  {name}: avg {:.2}", series.mean()));
        }
        if self.frames > 0 && elapsed_s > 0.0 {
            lines.push(format!(
                "  Throughput: {:.1} fps",
                self.frames as f64 / elapsed_s
            ));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(crate::shared::constants::DEFAULT_LOG_EVERY)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn frame_processed(&mut self, index: usize) {
        self.frames += 1;
        if self.frames % self.log_every == 0 {
            log::info!("Processed {} frames (latest #{index})", self.frames);
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_accepts_everything() {
        let mut logger = NullPipelineLogger;
        logger.frame_processed(0);
        logger.timing("detect", 5.0);
        logger.metric("faces", 1.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_counts_frames() {
        let mut logger = StdoutPipelineLogger::new(2);
        for i in 0..5 {
            logger.frame_processed(i);
        }
        assert_eq!(logger.frames(), 5);
    }

    #[test]
    fn test_timing_mean() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("detect", 10.0);
        logger.timing("detect", 20.0);
        logger.timing("project", 1.0);

        assert_relative_eq!(logger.mean_timing("detect").unwrap(), 15.0);
        assert_relative_eq!(logger.mean_timing("project").unwrap(), 1.0);
        assert!(logger.mean_timing("missing").is_none());
    }

    #[test]
    fn test_metric_mean() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.metric("faces", 1.0);
        logger.metric("faces", 0.0);
        assert_relative_eq!(logger.mean_metric("faces").unwrap(), 0.5);
    }

    #[test]
    fn test_summary_lists_stages_and_metrics() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.frame_processed(0);
        logger.timing("detect", 4.0);
        logger.metric("faces", 1.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Overlay summary (1 frames"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("faces: avg 1.00"));
    }

    #[test]
    fn test_empty_summary_is_none() {
        assert!(StdoutPipelineLogger::new(10).summary_string().is_none());
    }

    #[test]
    fn test_zero_throttle_is_clamped() {
        let mut logger = StdoutPipelineLogger::new(0);
        logger.frame_processed(0);
        assert_eq!(logger.log_every, 1);
    }
}
