// crates/bcsd_config/src/space.rs

//! Job parameter space.
//!
//! The unit of batch work is one `JobParameters` tuple. The full job list
//! is the Cartesian product of three fixed axes: models, periods
//! (scenario x year) and variables. Enumeration is pure and deterministic;
//! the external scheduler relies on stable ordering to map array-task
//! indices onto jobs.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emissions scenario of a source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Observed-forcing historical run, 1981-2005.
    Historical,
    /// RCP 4.5 projection, 2006-2099.
    Rcp45,
    /// RCP 8.5 projection, 2006-2099.
    Rcp85,
}

impl Scenario {
    /// Canonical lowercase name, matching the on-disk directory layout.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Rcp45 => "rcp45",
            Self::Rcp85 => "rcp85",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "historical" => Ok(Self::Historical),
            "rcp45" => Ok(Self::Rcp45),
            "rcp85" => Ok(Self::Rcp85),
            other => Err(ConfigError::UnknownScenario {
                name: other.to_string(),
            }),
        }
    }
}

/// One scenario-year pair on the period axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Scenario name.
    pub scenario: Scenario,
    /// Calendar year.
    pub year: u16,
}

/// Identity of one unit of batch work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobParameters {
    /// Climate model identifier, e.g. "CCSM4".
    pub model: String,
    /// Emissions scenario.
    pub scenario: Scenario,
    /// Calendar year of the source file.
    pub year: u16,
    /// Variable code, e.g. "tasmax".
    pub variable: String,
}

impl fmt::Display for JobParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.variable, self.scenario, self.model, self.year
        )
    }
}

/// The three enumerable axes defining the job space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpace {
    /// Climate model identifiers.
    pub models: Vec<String>,
    /// Scenario-year pairs.
    pub periods: Vec<Period>,
    /// Variable codes.
    pub variables: Vec<String>,
}

/// The 21 CMIP5 models present in the NASA BCSD archive.
const BCSD_MODELS: [&str; 21] = [
    "ACCESS1-0",
    "bcc-csm1-1",
    "BNU-ESM",
    "CanESM2",
    "CCSM4",
    "CESM1-BGC",
    "CNRM-CM5",
    "CSIRO-Mk3-6-0",
    "GFDL-CM3",
    "GFDL-ESM2G",
    "GFDL-ESM2M",
    "IPSL-CM5A-LR",
    "IPSL-CM5A-MR",
    "MIROC-ESM-CHEM",
    "MIROC-ESM",
    "MIROC5",
    "MPI-ESM-LR",
    "MPI-ESM-MR",
    "MRI-CGCM3",
    "inmcm4",
    "NorESM1-M",
];

impl ParameterSpace {
    /// The full BCSD daily-temperature job space: 21 models, historical
    /// 1981-2005 plus rcp45/rcp85 2006-2099, variables tasmax/tasmin/tas.
    pub fn bcsd_v1() -> Self {
        let mut periods = Vec::new();
        for year in 1981..=2005 {
            periods.push(Period {
                scenario: Scenario::Historical,
                year,
            });
        }
        for year in 2006..=2099 {
            periods.push(Period {
                scenario: Scenario::Rcp45,
                year,
            });
        }
        for year in 2006..=2099 {
            periods.push(Period {
                scenario: Scenario::Rcp85,
                year,
            });
        }

        Self {
            models: BCSD_MODELS.iter().map(|m| m.to_string()).collect(),
            periods,
            variables: vec![
                "tasmax".to_string(),
                "tasmin".to_string(),
                "tas".to_string(),
            ],
        }
    }

    /// Number of jobs in the space.
    pub fn len(&self) -> usize {
        self.models.len() * self.periods.len() * self.variables.len()
    }

    /// Whether the space is empty along any axis.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enumerate every job in the space.
    ///
    /// Pure function of the axis lists: no I/O, no duplicates, stable
    /// model-major then period then variable ordering.
    pub fn enumerate(&self) -> Vec<JobParameters> {
        let mut jobs = Vec::with_capacity(self.len());
        for model in &self.models {
            for period in &self.periods {
                for variable in &self.variables {
                    jobs.push(JobParameters {
                        model: model.clone(),
                        scenario: period.scenario,
                        year: period.year,
                        variable: variable.clone(),
                    });
                }
            }
        }
        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scenario_names_round_trip() {
        for s in [Scenario::Historical, Scenario::Rcp45, Scenario::Rcp85] {
            let parsed: Scenario = s.name().parse().unwrap();
            assert_eq!(parsed, s);
        }
        assert!("rcp60".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_bcsd_space_dimensions() {
        let space = ParameterSpace::bcsd_v1();
        assert_eq!(space.models.len(), 21);
        assert_eq!(space.periods.len(), 25 + 94 + 94);
        assert_eq!(space.variables.len(), 3);
        assert_eq!(space.len(), 21 * 213 * 3);
    }

    #[test]
    fn test_enumerate_count_and_uniqueness() {
        let space = ParameterSpace::bcsd_v1();
        let jobs = space.enumerate();
        assert_eq!(jobs.len(), space.len());

        let unique: HashSet<_> = jobs.iter().collect();
        assert_eq!(unique.len(), jobs.len());
    }

    #[test]
    fn test_enumerate_is_deterministic() {
        let space = ParameterSpace::bcsd_v1();
        assert_eq!(space.enumerate(), space.enumerate());

        // Model-major ordering: the first jobs all belong to the first model.
        let jobs = space.enumerate();
        let per_model = space.periods.len() * space.variables.len();
        assert!(jobs[..per_model].iter().all(|j| j.model == "ACCESS1-0"));
    }

    #[test]
    fn test_job_display() {
        let job = JobParameters {
            model: "CCSM4".into(),
            scenario: Scenario::Historical,
            year: 1990,
            variable: "tasmax".into(),
        };
        assert_eq!(job.to_string(), "tasmax_historical_CCSM4_1990");
    }
}
