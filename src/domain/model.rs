use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 參與者只以名稱識別
pub type Participant = String;

/// 組別名稱到成員名單的有序映射，順序即插入順序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupSplit {
    groups: IndexMap<String, Vec<Participant>>,
}

impl GroupSplit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the member list of an existing group in place, or appends a
    /// new group at the end of the iteration order.
    pub fn insert(&mut self, group: impl Into<String>, members: Vec<Participant>) {
        self.groups.insert(group.into(), members);
    }

    pub fn get(&self, group: &str) -> Option<&[Participant]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<Participant>)> {
        self.groups
            .iter_mut()
            .map(|(name, members)| (name.as_str(), members))
    }

    pub fn contains_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Participant])> {
        self.groups
            .iter()
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    /// 依組別順序串接所有已分配的成員
    pub fn assigned(&self) -> Vec<&Participant> {
        self.groups.values().flatten().collect()
    }

    pub fn total_assigned(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// 找出成員所在的組別
    pub fn group_of(&self, participant: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == participant))
            .map(|(name, _)| name.as_str())
    }
}

/// 單一組別的預先分配
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorPin {
    pub group: String,
    pub members: Vec<Participant>,
}

/// Pre-assigned placements applied before random filling, kept in the order
/// they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorAssignment {
    pins: Vec<PriorPin>,
}

impl PriorAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pin(mut self, group: impl Into<String>, members: &[&str]) -> Self {
        self.pins.push(PriorPin {
            group: group.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriorPin> {
        self.pins.iter()
    }

    pub fn pinned_participants(&self) -> impl Iterator<Item = &Participant> {
        self.pins.iter().flat_map(|pin| pin.members.iter())
    }
}

/// 一次完整分組的結果，交給 Reporter 使用
#[derive(Debug, Clone, Serialize)]
pub struct SplitOutcome {
    pub generated_at: DateTime<Local>,
    pub seed: Option<u64>,
    pub groups: GroupSplit,
}
