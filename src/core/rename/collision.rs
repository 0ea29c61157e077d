//! Detection and resolution of renames that share a destination.

use super::plan::RenameOperation;
use crate::config::RunOptions;
use crate::utils::collections::{count_occurrences, group_by_key};
use std::collections::HashSet;
use std::path::PathBuf;

/// A destination claimed by two or more sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub sources: Vec<PathBuf>,
    pub destination: PathBuf,
}

/// How colliding destinations are handled for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Skip detection and rename everything.
    Ignore,
    /// Drop every colliding operation and continue.
    Skip,
    /// Stop the run.
    Abort,
}

impl CollisionPolicy {
    pub fn from_options(options: &RunOptions) -> Self {
        if options.ignore_collisions {
            CollisionPolicy::Ignore
        } else if options.skip_problematic {
            CollisionPolicy::Skip
        } else {
            CollisionPolicy::Abort
        }
    }
}

/// Result of applying a [`CollisionPolicy`] to a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionResolution {
    /// Operations allowed to proceed. Empty when `fatal`.
    pub operations: Vec<RenameOperation>,
    pub collisions: Vec<Collision>,
    pub fatal: bool,
}

/// Group operations by destination and return the groups with more than one
/// member, or `None` if every destination is unique.
///
/// Collisions come back in order of first appearance of their destination;
/// sources keep their plan order. Operations without a destination are never
/// part of a collision.
pub fn detect_collisions(operations: &[RenameOperation]) -> Option<Vec<Collision>> {
    let counts = count_occurrences(operations.iter().filter_map(|op| op.destination.as_ref()));
    if counts.values().all(|&n| n < 2) {
        return None;
    }

    let collisions: Vec<Collision> = group_by_key(operations, |op| op.destination.clone())
        .into_iter()
        .filter_map(|(destination, members)| match destination {
            Some(destination) if members.len() > 1 => Some(Collision {
                sources: members.iter().map(|op| op.source.clone()).collect(),
                destination,
            }),
            _ => None,
        })
        .collect();

    if collisions.is_empty() {
        None
    } else {
        Some(collisions)
    }
}

/// Apply `policy` to the planned operations.
pub fn resolve_collisions(
    operations: Vec<RenameOperation>,
    policy: CollisionPolicy,
) -> CollisionResolution {
    if policy == CollisionPolicy::Ignore {
        return CollisionResolution {
            operations,
            collisions: Vec::new(),
            fatal: false,
        };
    }

    let Some(collisions) = detect_collisions(&operations) else {
        return CollisionResolution {
            operations,
            collisions: Vec::new(),
            fatal: false,
        };
    };

    match policy {
        CollisionPolicy::Skip => {
            let affected: HashSet<&PathBuf> =
                collisions.iter().flat_map(|c| c.sources.iter()).collect();
            let remaining = operations
                .into_iter()
                .filter(|op| !affected.contains(&op.source))
                .collect();
            CollisionResolution {
                operations: remaining,
                collisions,
                fatal: false,
            }
        }
        _ => CollisionResolution {
            operations: Vec::new(),
            collisions,
            fatal: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(source: &str, destination: &str) -> RenameOperation {
        RenameOperation::new(PathBuf::from(source), Some(PathBuf::from(destination)))
    }

    fn plan() -> Vec<RenameOperation> {
        vec![
            op("x.txt", "z.txt"),
            op("a.txt", "b.txt"),
            op("y.txt", "z.txt"),
            op("c.txt", "d.txt"),
            op("e.txt", "d.txt"),
            op("w.txt", "z.txt"),
        ]
    }

    #[test]
    fn no_collisions_returns_none() {
        let ops = vec![op("a", "b"), op("c", "d")];
        assert_eq!(detect_collisions(&ops), None);
    }

    #[test]
    fn collisions_are_grouped_in_first_seen_order() {
        let collisions = detect_collisions(&plan()).unwrap();
        assert_eq!(
            collisions,
            vec![
                Collision {
                    sources: vec!["x.txt".into(), "y.txt".into(), "w.txt".into()],
                    destination: "z.txt".into(),
                },
                Collision {
                    sources: vec!["c.txt".into(), "e.txt".into()],
                    destination: "d.txt".into(),
                },
            ]
        );
    }

    #[test]
    fn every_shared_destination_lands_in_exactly_one_collision() {
        let ops = plan();
        let collisions = detect_collisions(&ops).unwrap();
        for (i, a) in ops.iter().enumerate() {
            for b in ops.iter().skip(i + 1) {
                if a.destination != b.destination {
                    continue;
                }
                let holding: Vec<_> = collisions
                    .iter()
                    .filter(|c| c.sources.contains(&a.source) && c.sources.contains(&b.source))
                    .collect();
                assert_eq!(holding.len(), 1);
                assert_eq!(Some(&holding[0].destination), a.destination.as_ref());
            }
        }
    }

    #[test]
    fn unmatched_operations_never_collide() {
        let ops = vec![
            RenameOperation::new("a".into(), None),
            RenameOperation::new("b".into(), None),
        ];
        assert_eq!(detect_collisions(&ops), None);
    }

    #[test]
    fn abort_policy_drops_everything() {
        let resolution = resolve_collisions(plan(), CollisionPolicy::Abort);
        assert!(resolution.fatal);
        assert!(resolution.operations.is_empty());
        assert_eq!(resolution.collisions.len(), 2);
    }

    #[test]
    fn skip_policy_keeps_only_uncontested_operations() {
        let resolution = resolve_collisions(plan(), CollisionPolicy::Skip);
        assert!(!resolution.fatal);
        assert_eq!(resolution.operations, vec![op("a.txt", "b.txt")]);
        assert_eq!(resolution.collisions.len(), 2);
    }

    #[test]
    fn ignore_policy_passes_plan_through() {
        let resolution = resolve_collisions(plan(), CollisionPolicy::Ignore);
        assert!(!resolution.fatal);
        assert!(resolution.collisions.is_empty());
        assert_eq!(resolution.operations, plan());
    }

    #[test]
    fn policy_prefers_ignore_over_skip() {
        let options = RunOptions {
            ignore_collisions: true,
            skip_problematic: true,
            ..RunOptions::default()
        };
        assert_eq!(CollisionPolicy::from_options(&options), CollisionPolicy::Ignore);
        assert_eq!(
            CollisionPolicy::from_options(&RunOptions::default()),
            CollisionPolicy::Abort
        );
    }
}
