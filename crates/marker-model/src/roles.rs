//! Role extraction across sub-timelines.
//!
//! Sub-timelines are independent, so their clips are walked in parallel. The
//! per-timeline results land in a pre-sized vector by input index, which keeps
//! the flattened output in declaration order no matter which worker finishes
//! first.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use markex_common::progress::ProgressCounter;

use crate::marker::Role;

/// Roles used by one clip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipRoles {
    pub name: String,
    pub roles: Vec<Role>,
}

/// A nested timeline (compound clip, multicam angle, ...) and its clips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubTimeline {
    pub name: String,
    pub clips: Vec<ClipRoles>,
}

impl SubTimeline {
    /// Roles of this sub-timeline in clip order, first occurrence kept.
    pub fn roles(&self) -> Vec<Role> {
        let mut seen = HashSet::new();
        self.clips
            .iter()
            .flat_map(|clip| clip.roles.iter())
            .filter(|role| seen.insert(*role))
            .cloned()
            .collect()
    }
}

/// Collect the distinct roles used across all sub-timelines, in declaration
/// order. `progress` is incremented once per finished sub-timeline.
pub fn extract_roles(
    sub_timelines: &[SubTimeline],
    progress: Option<&ProgressCounter>,
) -> Vec<Role> {
    let mut per_timeline: Vec<Vec<Role>> = Vec::with_capacity(sub_timelines.len());
    sub_timelines
        .par_iter()
        .map(|sub| {
            let roles = sub.roles();
            if let Some(counter) = progress {
                counter.increment();
            }
            tracing::trace!(sub_timeline = %sub.name, roles = roles.len(), "Collected roles");
            roles
        })
        .collect_into_vec(&mut per_timeline);

    let mut seen = HashSet::new();
    per_timeline
        .into_iter()
        .flatten()
        .filter(|role| seen.insert(role.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(name: &str, roles: &[Role]) -> SubTimeline {
        SubTimeline {
            name: name.to_string(),
            clips: roles
                .iter()
                .enumerate()
                .map(|(i, role)| ClipRoles {
                    name: format!("{name}-clip-{i}"),
                    roles: vec![role.clone()],
                })
                .collect(),
        }
    }

    #[test]
    fn test_roles_keep_declaration_order() {
        let subs: Vec<SubTimeline> = (0..64)
            .map(|i| sub(&format!("t{i}"), &[Role::Audio(format!("A{i}"))]))
            .collect();
        let roles = extract_roles(&subs, None);
        let expected: Vec<Role> = (0..64).map(|i| Role::Audio(format!("A{i}"))).collect();
        assert_eq!(roles, expected);
    }

    #[test]
    fn test_roles_are_deduplicated_by_first_occurrence() {
        let subs = vec![
            sub("a", &[Role::Video("Titles".into()), Role::Audio("Dialogue".into())]),
            sub("b", &[Role::Audio("Music".into()), Role::Video("Titles".into())]),
        ];
        let roles = extract_roles(&subs, None);
        assert_eq!(
            roles,
            vec![
                Role::Video("Titles".into()),
                Role::Audio("Dialogue".into()),
                Role::Audio("Music".into()),
            ]
        );
    }

    #[test]
    fn test_progress_counts_every_sub_timeline() {
        let subs: Vec<SubTimeline> = (0..10).map(|i| sub(&format!("t{i}"), &[])).collect();
        let counter = ProgressCounter::new(subs.len());
        extract_roles(&subs, Some(&counter));
        assert!(counter.is_complete());
        assert_eq!(counter.completed(), 10);
    }
}
