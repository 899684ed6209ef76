//! Result surface of a run, as printed by the coordinator.

use std::fmt;

use serde::Serialize;

use crate::config::RunOptions;
use crate::error::{HeatError, Result};
use crate::solver::FieldStats;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub options: RunOptions,
    pub global_sum: f64,
    pub global_max: f64,
}

impl Report {
    pub fn new(options: RunOptions, stats: FieldStats) -> Self {
        Report { options, global_sum: stats.sum, global_max: stats.max }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HeatError::Serialization(e.to_string()))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Global sum: {:.6}", self.global_sum)?;
        write!(f, "Global max: {:.6}", self.global_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        let options = RunOptions { nx: 4, ny: 4, px: 2, py: 2, steps: 1, alpha: 0.1 };
        Report::new(options, FieldStats { sum: 100.0, max: 80.0 })
    }

    #[test]
    fn text_matches_classic_output() {
        assert_eq!(report().to_string(), "Global sum: 100.000000\nGlobal max: 80.000000");
    }

    #[test]
    fn json_carries_options_and_totals() {
        let v: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();
        assert_eq!(v["options"]["px"], 2);
        assert_eq!(v["global_sum"], 100.0);
        assert_eq!(v["global_max"], 80.0);
    }
}
