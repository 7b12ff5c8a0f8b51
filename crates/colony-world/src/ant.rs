//! Ant state and action generation.

use colony_core::{ActionKind, Position, RandomSource};
use serde::{Deserialize, Serialize};

/// An ant in the simulation. Its identity is its index in the ant registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ant {
    pub position: Position,
}

impl Ant {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Propose an action and its target cell.
    ///
    /// Draws the action kind first, then `dx` and `dy`. Both kinds share the
    /// same nine offsets, including staying in place.
    pub fn act<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (ActionKind, Position) {
        let kind = rng.action_kind();
        let dx = rng.offset();
        let dy = rng.offset();
        (kind, self.position.add(dx, dy))
    }

    pub fn move_to(&mut self, new_position: Position) {
        self.position = new_position;
    }

    /// Offspring placed at `target`
    pub fn offspring(&self, target: Position) -> Ant {
        Ant::new(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_ant_creation() {
        let ant = Ant::new(Position::new(2, 3));
        assert_eq!(ant.position, Position::new(2, 3));
    }

    #[test]
    fn test_act_targets_neighbourhood() {
        let ant = Ant::new(Position::new(5, 5));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut targets = HashSet::new();
        let mut kinds = HashSet::new();

        for _ in 0..500 {
            let (kind, target) = ant.act(&mut rng);
            assert!((target.x - 5).abs() <= 1);
            assert!((target.y - 5).abs() <= 1);
            targets.insert(target);
            kinds.insert(kind);
        }

        // All nine offsets, zero included
        assert_eq!(targets.len(), 9);
        assert!(targets.contains(&ant.position));
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_movement() {
        let mut ant = Ant::new(Position::new(0, 0));
        ant.move_to(Position::new(1, 1));
        assert_eq!(ant.position, Position::new(1, 1));

        let child = ant.offspring(Position::new(1, 2));
        assert_eq!(child.position, Position::new(1, 2));
        assert_eq!(ant.position, Position::new(1, 1));
    }
}
