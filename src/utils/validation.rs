use crate::core::split::per_group_capacity;
use crate::domain::model::{Participant, PriorAssignment};
use crate::utils::error::{GroupSplitError, Result};
use std::collections::{HashMap, HashSet};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GroupSplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GroupSplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GroupSplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(GroupSplitError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// 名稱不可為空白，也不可重複
pub fn validate_unique_names(field_name: &str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        validate_non_empty_string(field_name, name)?;
        if !seen.insert(name.as_str()) {
            return Err(GroupSplitError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.clone(),
                reason: "Name is listed more than once".to_string(),
            });
        }
    }
    Ok(())
}

/// Checks a full roster before splitting: unique participants and groups,
/// an even split, and priors that only pin known participants into declared
/// groups, at most once each and never beyond a group's capacity.
pub fn validate_roster(
    participants: &[Participant],
    group_names: &[String],
    priors: &PriorAssignment,
) -> Result<()> {
    validate_non_empty_list("roster.participants", participants)?;
    validate_non_empty_list("roster.groups", group_names)?;
    validate_unique_names("roster.participants", participants)?;
    validate_unique_names("roster.groups", group_names)?;

    let capacity = per_group_capacity(participants.len(), group_names.len())?;

    let pool: HashSet<&str> = participants.iter().map(String::as_str).collect();
    let groups: HashSet<&str> = group_names.iter().map(String::as_str).collect();
    let mut pinned_to: HashMap<&str, &str> = HashMap::new();
    let mut pinned_per_group: HashMap<&str, usize> = HashMap::new();

    for pin in priors.iter() {
        if !groups.contains(pin.group.as_str()) {
            return Err(GroupSplitError::InvalidConfigValueError {
                field: "priors.group".to_string(),
                value: pin.group.clone(),
                reason: "Group is not declared in roster.groups".to_string(),
            });
        }

        // 注入時後面的名單會覆蓋前面的，所以同一組只能出現一次
        if pinned_per_group
            .insert(pin.group.as_str(), pin.members.len())
            .is_some()
        {
            return Err(GroupSplitError::InvalidConfigValueError {
                field: "priors.group".to_string(),
                value: pin.group.clone(),
                reason: "Group has more than one prior assignment".to_string(),
            });
        }

        for member in &pin.members {
            if !pool.contains(member.as_str()) {
                return Err(GroupSplitError::InvalidConfigValueError {
                    field: format!("priors.{}", pin.group),
                    value: member.clone(),
                    reason: "Participant is not listed in roster.participants".to_string(),
                });
            }
            if let Some(previous) = pinned_to.insert(member.as_str(), pin.group.as_str()) {
                return Err(GroupSplitError::InvalidConfigValueError {
                    field: format!("priors.{}", pin.group),
                    value: member.clone(),
                    reason: format!("Participant is already pinned to group '{}'", previous),
                });
            }
        }
    }

    for (group, pinned) in pinned_per_group {
        if pinned > capacity {
            return Err(GroupSplitError::GroupOverCapacity {
                group: group.to_string(),
                capacity,
                assigned: pinned,
            });
        }
    }

    Ok(())
}
