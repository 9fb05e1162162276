//! # Schedules
//!
//! When a booth can be visited. Three shapes survived the schema history:
//! open the whole event, tours at a fixed interval, or a hand-picked list of
//! times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Schedule {
    Continuous,
    Regular { interval_minutes: u32 },
    Individual { times: Vec<DateTime<Utc>> },
}

impl Schedule {
    /// Enforce the shape invariants; returns an error message suitable for a
    /// 400 response.
    pub fn normalize(self) -> Result<Self, String> {
        match self {
            Self::Continuous => Ok(Self::Continuous),
            Self::Regular { interval_minutes } => {
                if interval_minutes == 0 {
                    return Err("Schedule interval must be greater than zero.".into());
                }
                Ok(Self::Regular { interval_minutes })
            }
            Self::Individual { mut times } => {
                if times.is_empty() {
                    return Err("Schedule must contain at least one time.".into());
                }
                times.sort();
                times.dedup();
                Ok(Self::Individual { times })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, minute, 0).unwrap()
    }

    #[test]
    fn individual_times_are_sorted_and_deduplicated() {
        let schedule = Schedule::Individual {
            times: vec![at(14, 0), at(9, 30), at(14, 0)],
        };
        assert_eq!(
            schedule.normalize().unwrap(),
            Schedule::Individual {
                times: vec![at(9, 30), at(14, 0)],
            }
        );
    }

    #[test]
    fn empty_individual_times_are_rejected() {
        assert!(Schedule::Individual { times: vec![] }.normalize().is_err());
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Schedule::Regular { interval_minutes: 0 }.normalize().is_err());
        assert!(Schedule::Regular { interval_minutes: 30 }.normalize().is_ok());
    }
}
