use super::naming::qualified_constant_name;
use crate::config::CollisionPolicy;
use crate::error::{QuadrantError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// One generated constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    /// Constant identifier, unique within a run
    pub name: String,
    /// Fully-qualified activity class name
    pub value: String,
    /// Module that declared the activity first
    pub module: String,
}

/// Ordered, duplicate-free constants ready for emission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub constants: Vec<ConstantEntry>,
    /// Declarations dropped because an earlier one resolved to the same class
    pub duplicates_dropped: usize,
}

impl GenerationResult {
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

/// Collects resolved class names in traversal order.
///
/// Feed it modules in name order, manifests in discovery order and
/// activities in document order; the first declaration of a class wins.
pub struct Aggregator {
    policy: CollisionPolicy,
    seen: HashSet<String>,
    pending: Vec<(String, String)>,
    duplicates: usize,
}

impl Aggregator {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            seen: HashSet::new(),
            pending: Vec::new(),
            duplicates: 0,
        }
    }

    /// Record a class name; returns false when it was already present
    pub fn push(&mut self, class_name: String, module: &str) -> bool {
        if self.seen.contains(&class_name) {
            trace!("Dropping duplicate declaration of {} in {}", class_name, module);
            self.duplicates += 1;
            return false;
        }
        self.seen.insert(class_name.clone());
        self.pending.push((class_name, module.to_string()));
        true
    }

    /// Assign identifiers and produce the final result
    pub fn finish(self) -> Result<GenerationResult> {
        let names = assign_identifiers(&self.pending, self.policy)?;

        let constants = self
            .pending
            .into_iter()
            .zip(names)
            .map(|((value, module), name)| ConstantEntry { name, value, module })
            .collect();

        Ok(GenerationResult {
            constants,
            duplicates_dropped: self.duplicates,
        })
    }
}

/// Derive one identifier per class, resolving collisions per `policy`.
///
/// Under [`CollisionPolicy::Qualify`] every member of a colliding group that
/// still has unused package segments gets one more, and the check repeats.
/// A group where nobody can grow is a hard collision.
fn assign_identifiers(
    pending: &[(String, String)],
    policy: CollisionPolicy,
) -> Result<Vec<String>> {
    let max_depth: Vec<usize> = pending
        .iter()
        .map(|(value, _)| value.matches('.').count())
        .collect();
    let mut depth = vec![0usize; pending.len()];

    loop {
        let names: Vec<String> = pending
            .iter()
            .zip(&depth)
            .map(|((value, _), &d)| qualified_constant_name(value, d))
            .collect();

        let colliding: Vec<(String, Vec<usize>)> = {
            let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
            for (i, name) in names.iter().enumerate() {
                groups.entry(name.as_str()).or_default().push(i);
            }
            groups
                .into_iter()
                .filter(|(_, members)| members.len() > 1)
                .map(|(name, members)| (name.to_string(), members))
                .collect()
        };

        if colliding.is_empty() {
            return Ok(names);
        }

        let mut next_depth = depth.clone();
        for (name, members) in &colliding {
            let collision = || QuadrantError::IdentifierCollision {
                identifier: name.clone(),
                first: pending[members[0]].0.clone(),
                second: pending[members[1]].0.clone(),
            };

            if policy == CollisionPolicy::Strict {
                return Err(collision());
            }

            let mut grew = false;
            for &i in members.iter() {
                if depth[i] < max_depth[i] {
                    next_depth[i] = depth[i] + 1;
                    grew = true;
                }
            }
            if !grew {
                return Err(collision());
            }
            debug!("Qualifying {} colliding constants named {}", members.len(), name);
        }
        depth = next_depth;
    }
}
