use crate::domain::model::{GroupSplit, Participant};
use crate::utils::error::{GroupSplitError, Result};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// 確認名單能平均分到 `n_groups` 組，回傳每組人數
pub fn per_group_capacity(n_participants: usize, n_groups: usize) -> Result<usize> {
    if n_groups == 0 {
        return Err(GroupSplitError::NoGroups);
    }
    if n_participants % n_groups != 0 {
        return Err(GroupSplitError::UnevenSplit {
            participants: n_participants,
            groups: n_groups,
        });
    }
    Ok(n_participants / n_groups)
}

/// Fills every group of `split` to capacity with participants drawn
/// uniformly at random, without replacement, from the part of `pool` not
/// already assigned.
///
/// Groups are filled in the split's iteration order and each draw is removed
/// from the shared remaining pool before the next group is visited. Existing
/// members keep their order; drawn members are appended in draw order.
pub fn perform_split<R: Rng + ?Sized>(
    pool: &[Participant],
    mut split: GroupSplit,
    rng: &mut R,
) -> Result<GroupSplit> {
    let capacity = per_group_capacity(pool.len(), split.group_count())?;

    // 任何一組超額都必須在抽取前拒絕
    if let Some((group, members)) = split.iter().find(|(_, members)| members.len() > capacity) {
        return Err(GroupSplitError::GroupOverCapacity {
            group: group.to_string(),
            capacity,
            assigned: members.len(),
        });
    }

    let assigned: HashSet<&str> = split.assigned().into_iter().map(String::as_str).collect();
    let mut remaining: Vec<Participant> = pool
        .iter()
        .filter(|p| !assigned.contains(p.as_str()))
        .cloned()
        .collect();

    tracing::debug!(
        "Splitting {} participants into {} groups of {}, {} left to draw",
        pool.len(),
        split.group_count(),
        capacity,
        remaining.len()
    );

    for (name, members) in split.iter_mut() {
        let slots = capacity - members.len();
        if slots > remaining.len() {
            return Err(GroupSplitError::PoolExhausted {
                group: name.to_string(),
                requested: slots,
                available: remaining.len(),
            });
        }

        let picked = index::sample(rng, remaining.len(), slots).into_vec();
        let drawn: Vec<Participant> = picked.iter().map(|&i| remaining[i].clone()).collect();

        let picked: HashSet<usize> = picked.into_iter().collect();
        remaining = remaining
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !picked.contains(i))
            .map(|(_, p)| p)
            .collect();

        tracing::debug!("Group {} drew {:?}", name, drawn);
        members.extend(drawn);
    }

    Ok(split)
}

/// 持有亂數來源的分組引擎
pub struct SplitEngine<R: Rng> {
    rng: R,
    seed: Option<u64>,
}

impl<R: Rng> SplitEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, seed: None }
    }

    /// Seed the engine was built from, when known.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn split(&mut self, pool: &[Participant], split: GroupSplit) -> Result<GroupSplit> {
        perform_split(pool, split, &mut self.rng)
    }
}

impl SplitEngine<ChaCha8Rng> {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// 產生隨機種子並記錄下來，方便重現同一次分組
    pub fn from_entropy() -> Self {
        let seed = rand::random::<u64>();
        tracing::debug!("Generated split seed {}", seed);
        Self::with_seed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::initializer::initialize_groups;
    use crate::core::priors::inject_priors;
    use crate::domain::model::PriorAssignment;

    fn pool(n: usize) -> Vec<Participant> {
        (1..=n).map(|i| format!("P{}", i)).collect()
    }

    #[test]
    fn test_capacity_requires_even_split() {
        assert_eq!(per_group_capacity(8, 2).unwrap(), 4);
        assert!(matches!(
            per_group_capacity(17, 2),
            Err(GroupSplitError::UnevenSplit {
                participants: 17,
                groups: 2
            })
        ));
        assert!(matches!(
            per_group_capacity(4, 0),
            Err(GroupSplitError::NoGroups)
        ));
    }

    #[test]
    fn test_prior_members_keep_their_order_and_come_first() {
        let split = inject_priors(
            initialize_groups(&["A", "B"]),
            &PriorAssignment::new()
                .with_pin("A", &["P2", "P1"])
                .with_pin("B", &["P3"]),
        );

        let mut engine = SplitEngine::with_seed(7);
        let split = engine.split(&pool(8), split).unwrap();

        let a = split.get("A").unwrap();
        assert_eq!(&a[..2], &["P2".to_string(), "P1".to_string()]);
        assert_eq!(a.len(), 4);
        assert_eq!(split.get("B").unwrap()[0], "P3");
        assert_eq!(split.get("B").unwrap().len(), 4);
    }

    #[test]
    fn test_same_seed_gives_same_split() {
        let first = SplitEngine::with_seed(42)
            .split(&pool(12), initialize_groups(&["A", "B", "C"]))
            .unwrap();
        let second = SplitEngine::with_seed(42)
            .split(&pool(12), initialize_groups(&["A", "B", "C"]))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_over_capacity_group_is_rejected() {
        let split = inject_priors(
            initialize_groups(&["A", "B"]),
            &PriorAssignment::new().with_pin("A", &["P1", "P2", "P3"]),
        );

        let err = SplitEngine::with_seed(1).split(&pool(4), split).unwrap_err();
        assert!(matches!(
            err,
            GroupSplitError::GroupOverCapacity {
                ref group,
                capacity: 2,
                assigned: 3
            } if group == "A"
        ));
    }

    #[test]
    fn test_later_over_capacity_group_is_rejected_before_drawing() {
        let split = inject_priors(
            initialize_groups(&["A", "B"]),
            &PriorAssignment::new().with_pin("B", &["P1", "P2", "P3"]),
        );

        let err = SplitEngine::with_seed(1).split(&pool(4), split).unwrap_err();
        assert!(matches!(
            err,
            GroupSplitError::GroupOverCapacity {
                ref group,
                capacity: 2,
                assigned: 3
            } if group == "B"
        ));
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Split);
    }

    #[test]
    fn test_full_group_draws_nothing() {
        let split = inject_priors(
            initialize_groups(&["A", "B"]),
            &PriorAssignment::new().with_pin("A", &["P1", "P2"]),
        );

        let split = SplitEngine::with_seed(3).split(&pool(4), split).unwrap();
        assert_eq!(split.get("A"), Some(&["P1".to_string(), "P2".to_string()][..]));
        let mut b = split.get("B").unwrap().to_vec();
        b.sort();
        assert_eq!(b, vec!["P3".to_string(), "P4".to_string()]);
    }

    #[test]
    fn test_outside_participant_leaves_pool_member_unassigned() {
        // P9 is not in the pool: A fills up with one real participant fewer
        // and one pool member is never drawn.
        let split = inject_priors(
            initialize_groups(&["A", "B"]),
            &PriorAssignment::new().with_pin("A", &["P9"]),
        );

        let split = SplitEngine::with_seed(5).split(&pool(4), split).unwrap();
        assert_eq!(split.total_assigned(), 4);
        assert_eq!(split.group_of("P9"), Some("A"));
        let missing = pool(4)
            .iter()
            .filter(|p| split.group_of(p).is_none())
            .count();
        assert_eq!(missing, 1);
    }

    #[test]
    fn test_duplicated_pool_entry_exhausts_pool() {
        let pool: Vec<Participant> = ["P1", "P1", "P2", "P3"]
            .iter()
            .map(|p| p.to_string())
            .collect();
        let split = inject_priors(
            initialize_groups(&["A", "B"]),
            &PriorAssignment::new().with_pin("A", &["P1"]),
        );

        let err = SplitEngine::with_seed(5).split(&pool, split).unwrap_err();
        assert!(matches!(err, GroupSplitError::PoolExhausted { .. }));
    }

    #[test]
    fn test_entropy_engine_records_its_seed() {
        let engine = SplitEngine::from_entropy();
        assert!(engine.seed().is_some());
        assert!(SplitEngine::new(ChaCha8Rng::seed_from_u64(1)).seed().is_none());
    }
}
