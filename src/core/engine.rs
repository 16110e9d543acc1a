use crate::core::initializer::initialize_groups;
use crate::core::priors::inject_priors;
use crate::core::split::SplitEngine;
use crate::domain::model::SplitOutcome;
use crate::domain::ports::{Reporter, RosterProvider};
use crate::utils::error::Result;
use crate::utils::validation::validate_roster;
use chrono::Local;

pub struct SplitRunner<P: Reporter> {
    reporter: P,
    validate: bool,
}

impl<P: Reporter> SplitRunner<P> {
    pub fn new(reporter: P) -> Self {
        Self {
            reporter,
            validate: true,
        }
    }

    /// Skips roster validation so priors are applied exactly as given.
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// 初始化 → 注入預先分配 → 隨機補滿，不輸出報告
    pub fn split<R: RosterProvider>(&self, roster: &R) -> Result<SplitOutcome> {
        if self.validate {
            validate_roster(roster.participants(), roster.group_names(), roster.priors())?;
            tracing::debug!("Roster validated");
        }

        let mut engine = match roster.seed() {
            Some(seed) => SplitEngine::with_seed(seed),
            None => SplitEngine::from_entropy(),
        };

        let groups = initialize_groups(roster.group_names());
        let groups = inject_priors(groups, roster.priors());
        tracing::info!(
            "Splitting {} participants into {} groups ({} pinned in advance)",
            roster.participants().len(),
            groups.group_count(),
            groups.total_assigned()
        );

        let groups = engine.split(roster.participants(), groups)?;

        Ok(SplitOutcome {
            generated_at: Local::now(),
            seed: engine.seed(),
            groups,
        })
    }

    pub fn run<R: RosterProvider>(&self, roster: &R) -> Result<(SplitOutcome, Vec<String>)> {
        let outcome = self.split(roster)?;
        let outputs = self.reporter.report(&outcome)?;
        Ok((outcome, outputs))
    }
}
