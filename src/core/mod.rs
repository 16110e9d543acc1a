pub mod engine;
pub mod initializer;
pub mod priors;
pub mod split;

pub use crate::domain::model::{GroupSplit, Participant, PriorAssignment, SplitOutcome};
pub use crate::domain::ports::{Reporter, RosterProvider, Storage};
pub use crate::utils::error::Result;
