use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Record of one resample-move pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejuvenationRecord {
    /// Number of observations ingested when the pass ran.
    pub observation_count: usize,
    /// Fraction of move proposals accepted, in `[0, 1]`.
    pub acceptance_ratio: f64,
}

/// Advisory event recorded when the effective sample size drops below the
/// configured floor. Telemetry only; the filter takes no corrective action
/// beyond its regular rejuvenation trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssAdvisory {
    /// Number of observations ingested when the event fired.
    pub observation_count: usize,
    /// The effective sample size that triggered the event.
    pub ess: f64,
}

/// Collects per-observation telemetry for the lifetime of a filter.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsRecorder {
    ess_history: Vec<f64>,
    rejuvenations: Vec<RejuvenationRecord>,
    advisories: Vec<EssAdvisory>,
}

impl DiagnosticsRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the effective sample size measured after an observation,
    /// emitting an advisory event when it falls below `warning_floor`.
    pub fn record_ess(&mut self, observation_count: usize, ess: f64, warning_floor: f64) {
        self.ess_history.push(ess);
        if ess < warning_floor {
            self.advisories.push(EssAdvisory {
                observation_count,
                ess,
            });
        }
    }

    /// Records a completed resample-move pass.
    pub fn record_rejuvenation(&mut self, observation_count: usize, acceptance_ratio: f64) {
        self.rejuvenations.push(RejuvenationRecord {
            observation_count,
            acceptance_ratio,
        });
    }

    /// Effective sample size after each observation, in ingestion order.
    pub fn ess_history(&self) -> &[f64] {
        &self.ess_history
    }

    /// Every resample-move pass performed so far.
    pub fn rejuvenations(&self) -> &[RejuvenationRecord] {
        &self.rejuvenations
    }

    /// Low-ESS advisory events recorded so far.
    pub fn advisories(&self) -> &[EssAdvisory] {
        &self.advisories
    }

    /// Writes the per-observation telemetry to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let by_observation: BTreeMap<usize, f64> = self
            .rejuvenations
            .iter()
            .map(|r| (r.observation_count, r.acceptance_ratio))
            .collect();
        let mut file = File::create(path)?;
        writeln!(file, "observation,ess,rejuvenated,acceptance_ratio")?;
        for (index, ess) in self.ess_history.iter().enumerate() {
            let observation = index + 1;
            match by_observation.get(&observation) {
                Some(ratio) => {
                    writeln!(file, "{},{:.6},1,{:.6}", observation, ess, ratio)?;
                }
                None => {
                    writeln!(file, "{},{:.6},0,", observation, ess)?;
                }
            }
        }
        Ok(())
    }
}
