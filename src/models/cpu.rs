// CPU utilization samples

use serde::{Deserialize, Serialize};

/// One CPU reading: whole seconds since the sampling window opened, and the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuSample {
    pub elapsed_secs: u64,
    pub percent: i64,
}

impl CpuSample {
    pub fn new(elapsed_secs: u64, percent: i64) -> Self {
        Self {
            elapsed_secs,
            percent,
        }
    }
}
