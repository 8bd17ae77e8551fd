//! Optional temporal smoothing of measurements across consecutive frames.
//!
//! A [`MeasurementSmoother`] keeps a short history per metric name and must
//! belong to exactly one capture session. [`SmoothedEngine`] pairs one with a
//! shared [`AssessmentEngine`]; it needs `&mut self`, so two sessions cannot
//! feed the same buffer by accident.

use crate::config::{SmoothingConfig, SmoothingMethod};
use crate::core::{AngleMeasurement, RegionMeasurements, Snapshot};
use crate::report::{AssessmentEngine, AssessmentReport};
use std::collections::{HashMap, VecDeque};
use tracing::info;

#[derive(Debug, Clone)]
pub struct MeasurementSmoother {
    config: SmoothingConfig,
    history: HashMap<String, VecDeque<f64>>,
    averages: HashMap<String, f64>,
    last_timestamp_ms: Option<i64>,
}

impl MeasurementSmoother {
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            config,
            history: HashMap::new(),
            averages: HashMap::new(),
            last_timestamp_ms: None,
        }
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Weight of the newest sample for exponential smoothing over `window` frames.
    pub fn alpha(&self) -> f64 {
        2.0 / (self.config.window as f64 + 1.0)
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.averages.clear();
        self.last_timestamp_ms = None;
    }

    /// Number of samples currently buffered for `metric`.
    pub fn depth(&self, metric: &str) -> usize {
        match self.config.method {
            SmoothingMethod::Windowed => self.history.get(metric).map_or(0, VecDeque::len),
            SmoothingMethod::Exponential => usize::from(self.averages.contains_key(metric)),
        }
    }

    /// Feed one sample and return the smoothed value.
    pub fn smooth_value(&mut self, metric: &str, value: f64) -> f64 {
        if !self.config.is_enabled() {
            return value;
        }

        match self.config.method {
            SmoothingMethod::Windowed => {
                let window = self.config.window;
                let history = self
                    .history
                    .entry(metric.to_string())
                    .or_insert_with(|| VecDeque::with_capacity(window));
                history.push_back(value);
                while history.len() > window {
                    history.pop_front();
                }
                history.iter().sum::<f64>() / history.len() as f64
            }
            SmoothingMethod::Exponential => {
                let alpha = self.alpha();
                let average = self
                    .averages
                    .entry(metric.to_string())
                    .and_modify(|avg| *avg = alpha * value + (1.0 - alpha) * *avg)
                    .or_insert(value);
                *average
            }
        }
    }

    pub fn smooth(&mut self, measurement: &AngleMeasurement) -> AngleMeasurement {
        let value = self.smooth_value(&measurement.name, measurement.value);
        measurement.with_value(value)
    }

    /// Smooth every measurement of one frame. A timestamp earlier than the
    /// previous frame's starts a new session and clears the history.
    pub fn smooth_frame(
        &mut self,
        timestamp_ms: i64,
        regions: Vec<RegionMeasurements>,
    ) -> Vec<RegionMeasurements> {
        if self.last_timestamp_ms.is_some_and(|last| timestamp_ms < last) {
            info!(timestamp_ms, "timestamp went backwards, resetting smoother");
            self.reset();
        }
        self.last_timestamp_ms = Some(timestamp_ms);

        regions
            .into_iter()
            .map(|region| {
                let measurements = region.measurements.iter().map(|m| self.smooth(m)).collect();
                RegionMeasurements::new(region.region, measurements)
            })
            .collect()
    }
}

/// An engine plus the smoothing state of one capture session.
#[derive(Debug)]
pub struct SmoothedEngine<'a> {
    engine: &'a AssessmentEngine,
    smoother: MeasurementSmoother,
}

impl<'a> SmoothedEngine<'a> {
    /// Smoothing follows `engine.config().smoothing`.
    pub fn new(engine: &'a AssessmentEngine) -> Self {
        Self::with_smoother(engine, MeasurementSmoother::new(engine.config().smoothing))
    }

    pub fn with_smoother(engine: &'a AssessmentEngine, smoother: MeasurementSmoother) -> Self {
        Self { engine, smoother }
    }

    pub fn engine(&self) -> &AssessmentEngine {
        self.engine
    }

    pub fn smoother(&self) -> &MeasurementSmoother {
        &self.smoother
    }

    pub fn reset(&mut self) {
        info!("smoothing history cleared");
        self.smoother.reset();
    }

    /// Assess the next frame of the session. Empty frames leave the history untouched.
    pub fn assess(&mut self, snapshot: &Snapshot) -> AssessmentReport {
        if snapshot.is_empty() {
            return self.engine.assess(snapshot);
        }

        let extracted = self.engine.extract(snapshot);
        let smoothed = self.smoother.smooth_frame(snapshot.timestamp_ms(), extracted);
        self.engine.build_report(snapshot, smoothed)
    }
}
