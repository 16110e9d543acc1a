use crate::domain::model::{GroupSplit, PriorAssignment};

/// 將預先分配寫入目前的分組
///
/// Each pinned group's list is overwritten, not appended to. Groups that are
/// not yet part of the split are appended at the end of its order. No
/// membership checks happen here; see `validation::validate_roster`.
pub fn inject_priors(mut split: GroupSplit, priors: &PriorAssignment) -> GroupSplit {
    for pin in priors.iter() {
        if !split.contains_group(&pin.group) {
            tracing::warn!(
                "Prior assignment references undeclared group '{}', appending it",
                pin.group
            );
        }
        tracing::debug!("Pinning {:?} to group {}", pin.members, pin.group);
        split.insert(pin.group.clone(), pin.members.clone());
    }

    split
}
