use crate::domain::model::{Participant, PriorAssignment, SplitOutcome};
use crate::utils::error::Result;

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

/// 提供一次分組所需的名單、組別與預先分配
pub trait RosterProvider {
    fn participants(&self) -> &[Participant];
    fn group_names(&self) -> &[String];
    fn priors(&self) -> &PriorAssignment;
    fn seed(&self) -> Option<u64>;
}

pub trait Reporter {
    /// Renders the outcome and returns where it went (a path or "stdout").
    fn report(&self, outcome: &SplitOutcome) -> Result<Vec<String>>;
}
