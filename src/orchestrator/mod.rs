mod errors;
mod interceptor;
mod run;

use std::fmt;
use std::fmt::{Display, Formatter};

pub use errors::RunFailure;
pub use interceptor::traced;
pub use run::Orchestrator;

use crate::engine::StepCounts;
use crate::relocation::RelocationSummary;

/// Final outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing was skipped and every file went to the completed directory.
    Success,
    /// Items were skipped and every file went to the error directory.
    CompletedWithErrors,
    /// The skip limit was exceeded or a filesystem operation failed.
    Fatal
}

impl RunStatus {
    /// Process exit code for this status. Routing files to the error
    /// directory is not a process failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunStatus::Success | RunStatus::CompletedWithErrors => 0,
            RunStatus::Fatal => 1
        }
    }
}

impl Display for RunStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let status = match self {
            RunStatus::Success => "SUCCESS",
            RunStatus::CompletedWithErrors => "COMPLETED_WITH_ERRORS",
            RunStatus::Fatal => "FATAL"
        };

        formatter.write_str(status)
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    /// Counts gathered by ingestion, partial when ingestion was aborted.
    pub counts: StepCounts,
    /// `None` when relocation did not run or did not finish.
    pub relocation: Option<RelocationSummary>,
    /// The cause of a `Fatal` status.
    pub failure: Option<RunFailure>
}

impl RunReport {
    pub fn success_count(&self) -> usize {
        self.counts.write_count
    }

    pub fn failure_count(&self) -> usize {
        self.counts.skip_count()
    }
}
