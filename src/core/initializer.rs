use crate::domain::model::GroupSplit;

/// 依輸入順序為每個組別建立空名單
///
/// Group names are expected to be unique; a repeated name collapses into
/// the position of its first occurrence.
pub fn initialize_groups<S: AsRef<str>>(group_names: &[S]) -> GroupSplit {
    let mut split = GroupSplit::new();
    for name in group_names {
        split.insert(name.as_ref(), Vec::new());
    }

    tracing::debug!("Initialized {} empty groups", split.group_count());
    split
}
