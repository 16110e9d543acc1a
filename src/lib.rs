pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::TomlConfig;
pub use core::{
    engine::SplitRunner,
    initializer::initialize_groups,
    priors::inject_priors,
    split::{perform_split, per_group_capacity, SplitEngine},
};
pub use domain::model::{GroupSplit, Participant, PriorAssignment, PriorPin, SplitOutcome};
pub use domain::ports::{Reporter, RosterProvider, Storage};
pub use report::{ConsoleReporter, FileReporter, ReportFormat};
pub use utils::error::{GroupSplitError, Result};
