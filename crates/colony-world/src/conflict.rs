//! Conflict resolution between candidate actions.
//!
//! A target cell claimed by two or more candidates is rejected for all of
//! them. There is no "first wins": contested cells stay untouched for the tick.

use colony_core::{ActionKind, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A proposed action for one ant before conflict resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Index of the acting ant in the registry
    pub ant: usize,
    pub kind: ActionKind,
    pub target: Position,
}

impl Candidate {
    pub fn new(ant: usize, kind: ActionKind, target: Position) -> Self {
        Self { ant, kind, target }
    }
}

/// Outcome of [`resolve`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Candidates with a uniquely claimed target, ascending by ant index
    pub accepted: Vec<Candidate>,
    /// Candidates dropped because another candidate wanted the same cell
    pub contested: Vec<Candidate>,
}

/// Split candidates into those with a unique target and those without.
pub fn resolve(candidates: Vec<Candidate>) -> Resolution {
    let mut claims: HashMap<Position, usize> = HashMap::with_capacity(candidates.len());
    for candidate in &candidates {
        *claims.entry(candidate.target).or_insert(0) += 1;
    }

    let (mut accepted, contested): (Vec<Candidate>, Vec<Candidate>) = candidates
        .into_iter()
        .partition(|candidate| claims.get(&candidate.target).copied() == Some(1));

    accepted.sort_by_key(|candidate| candidate.ant);

    Resolution {
        accepted,
        contested,
    }
}
