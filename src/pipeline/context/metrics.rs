use indexmap::IndexMap;
use std::fmt;
use std::time::Duration;

/// Timed sections of one analysis, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelinePhase {
    Capture,
    Grounding,
    Synthesis,
    Assembly,
}

impl PipelinePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelinePhase::Capture => "capture",
            PipelinePhase::Grounding => "grounding",
            PipelinePhase::Synthesis => "synthesis",
            PipelinePhase::Assembly => "assembly",
        }
    }
}

/// Per-request phase durations, kept in the order they were recorded
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    phase_durations: IndexMap<PipelinePhase, Duration>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, phase: PipelinePhase, duration: Duration) {
        *self.phase_durations.entry(phase).or_default() += duration;
    }

    pub fn get(&self, phase: PipelinePhase) -> Duration {
        self.phase_durations
            .get(&phase)
            .copied()
            .unwrap_or_default()
    }

    pub fn total(&self) -> Duration {
        self.phase_durations.values().sum()
    }

    pub fn phases(&self) -> impl Iterator<Item = (&PipelinePhase, &Duration)> {
        self.phase_durations.iter()
    }
}

impl fmt::Display for StageTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (phase, duration) in &self.phase_durations {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}ms", phase.as_str(), duration.as_millis())?;
            first = false;
        }
        Ok(())
    }
}
