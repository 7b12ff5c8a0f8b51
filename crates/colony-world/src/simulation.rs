//! Simulation engine advancing the colony one tick at a time.

use crate::ant::Ant;
use crate::conflict::{self, Candidate};
use crate::fruit::{self, Fruit};
use crate::grid::Grid;
use crate::render::Frame;
use colony_core::{
    validate_grid_size, ActionKind, Cell, Error, FruitConfig, Position, RandomSource, Result,
    SimulationConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, trace};

/// Counters for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// One candidate per ant alive at the start of the tick
    pub proposed: usize,
    /// Targets outside the grid or not empty before the tick
    pub rejected_placement: usize,
    /// Targets claimed by more than one candidate
    pub rejected_conflict: usize,
    pub moves: usize,
    pub births: usize,
    pub fruit_eaten: usize,
    pub fruit_spawned: usize,
}

/// Totals since construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks: u64,
    pub moves: u64,
    pub births: u64,
    pub conflicts: u64,
    pub fruit_eaten: u64,
    pub fruit_spawned: u64,
}

impl RunStats {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.moves += report.moves as u64;
        self.births += report.births as u64;
        self.conflicts += report.rejected_conflict as u64;
        self.fruit_eaten += report.fruit_eaten as u64;
        self.fruit_spawned += report.fruit_spawned as u64;
    }
}

pub struct Simulation<R = ChaCha8Rng> {
    grid: Grid,
    ants: Vec<Ant>,
    fruits: Vec<Fruit>,
    fruit_config: FruitConfig,
    rng: R,
    tick: u64,
    last_report: TickReport,
    stats: RunStats,
}

impl Simulation<ChaCha8Rng> {
    /// Construct with a ChaCha8 generator seeded from `config.seed`, or from
    /// OS entropy when no seed is set.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Generate a random grid and build the registries from it.
    ///
    /// Fails with [`Error::NoAnts`] or [`Error::NoFruit`] when the draw leaves
    /// either registry empty.
    #[instrument(skip_all, fields(width = config.world.width, height = config.world.height))]
    pub fn new(config: &SimulationConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let grid = Grid::generate(&config.world, &mut rng);

        let ants: Vec<Ant> = grid.positions_of(Cell::Ant).into_iter().map(Ant::new).collect();
        if ants.is_empty() {
            return Err(Error::NoAnts);
        }

        let fruits: Vec<Fruit> = grid
            .positions_of(Cell::Fruit)
            .into_iter()
            .map(Fruit::new)
            .collect();
        if fruits.is_empty() {
            return Err(Error::NoFruit);
        }

        info!(
            ants = ants.len(),
            fruits = fruits.len(),
            empty = grid.count(Cell::Empty),
            "Simulation constructed"
        );

        Ok(Self::assemble(grid, ants, fruits, config.fruit, rng))
    }

    /// Construct from explicit positions instead of a random draw.
    ///
    /// Positions must be inside the grid and pairwise distinct across both lists.
    pub fn from_layout(
        width: i32,
        height: i32,
        ants: &[Position],
        fruits: &[Position],
        fruit_config: FruitConfig,
        rng: R,
    ) -> Result<Self> {
        validate_grid_size(width, height)?;
        fruit_config.validate()?;
        if ants.is_empty() {
            return Err(Error::NoAnts);
        }
        if fruits.is_empty() {
            return Err(Error::NoFruit);
        }

        let mut grid = Grid::new(width, height);
        let placements = ants
            .iter()
            .map(|pos| (*pos, Cell::Ant))
            .chain(fruits.iter().map(|pos| (*pos, Cell::Fruit)));

        for (pos, cell) in placements {
            if !grid.can_place(pos) {
                return Err(Error::Validation(format!(
                    "cannot place {:?} at {}: outside the grid or already occupied",
                    cell, pos
                )));
            }
            grid.set(pos, cell);
        }

        let ants = ants.iter().copied().map(Ant::new).collect();
        let fruits = fruits.iter().copied().map(Fruit::new).collect();

        Ok(Self::assemble(grid, ants, fruits, fruit_config, rng))
    }

    fn assemble(
        grid: Grid,
        ants: Vec<Ant>,
        fruits: Vec<Fruit>,
        fruit_config: FruitConfig,
        rng: R,
    ) -> Self {
        Self {
            grid,
            ants,
            fruits,
            fruit_config,
            rng,
            tick: 0,
            last_report: TickReport::default(),
            stats: RunStats::default(),
        }
    }

    /// Advance one tick.
    ///
    /// Phases run in order: candidate generation against the pre-tick grid,
    /// conflict resolution, application by ascending ant index, fruit
    /// consumption, fruit spawn.
    pub fn advance(&mut self) {
        let mut report = TickReport {
            tick: self.tick + 1,
            ..Default::default()
        };

        let candidates = self.propose(&mut report);

        let resolution = conflict::resolve(candidates);
        report.rejected_conflict = resolution.contested.len();
        for candidate in &resolution.contested {
            trace!(
                ant = candidate.ant,
                kind = ?candidate.kind,
                target = %candidate.target,
                "Candidate rejected: contested target"
            );
        }

        self.apply(&resolution.accepted, &mut report);
        self.consume_fruit(&mut report);
        self.spawn_fruit(&mut report);

        self.tick += 1;
        self.stats.record(&report);
        self.last_report = report;

        debug!(
            tick = self.tick,
            ants = self.ants.len(),
            fruits = self.fruits.len(),
            proposed = report.proposed,
            rejected_placement = report.rejected_placement,
            rejected_conflict = report.rejected_conflict,
            moves = report.moves,
            births = report.births,
            fruit_eaten = report.fruit_eaten,
            fruit_spawned = report.fruit_spawned,
            "Tick complete"
        );
    }

    fn propose(&mut self, report: &mut TickReport) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(self.ants.len());

        for (index, ant) in self.ants.iter().enumerate() {
            let (kind, target) = ant.act(&mut self.rng);

            if self.grid.can_place(target) {
                candidates.push(Candidate::new(index, kind, target));
            } else {
                report.rejected_placement += 1;
                trace!(ant = index, kind = ?kind, target = %target, "Candidate rejected: cannot place");
            }
        }

        report.proposed = self.ants.len();
        candidates
    }

    fn apply(&mut self, accepted: &[Candidate], report: &mut TickReport) {
        for candidate in accepted {
            match candidate.kind {
                ActionKind::Move => {
                    let ant = &mut self.ants[candidate.ant];
                    self.grid.set(ant.position, Cell::Empty);
                    self.grid.set(candidate.target, Cell::Ant);
                    ant.move_to(candidate.target);
                    report.moves += 1;
                }
                ActionKind::Reproduce => {
                    let child = self.ants[candidate.ant].offspring(candidate.target);
                    self.grid.set(candidate.target, Cell::Ant);
                    self.ants.push(child);
                    report.births += 1;
                }
            }
        }
    }

    fn consume_fruit(&mut self, report: &mut TickReport) {
        let eaten = fruit::consumed_indices(&self.fruits, &self.ants);
        if eaten.is_empty() {
            return;
        }

        for fruit in fruit::remove_consumed(&mut self.fruits, &eaten) {
            // An ant stands here, so the cell is the ant's
            self.grid.set(fruit.position, Cell::Ant);
            debug!(position = %fruit.position, tick = self.tick + 1, "Fruit eaten");
        }

        report.fruit_eaten = eaten.len();
    }

    fn spawn_fruit(&mut self, report: &mut TickReport) {
        if !self.fruit_config.allows_spawn(self.fruits.len()) {
            return;
        }

        match fruit::spawn_site(&self.grid, &mut self.rng) {
            Some(pos) => {
                self.grid.set(pos, Cell::Fruit);
                self.fruits.push(Fruit::new(pos));
                report.fruit_spawned = 1;
            }
            None => debug!(tick = self.tick + 1, "No empty cell for fruit spawn"),
        }
    }

    /// Verify cell counts and the registry/grid bijections
    pub fn check_invariants(&self) -> Result<()> {
        let expected = self.grid.width as usize * self.grid.height as usize;
        if self.grid.len() != expected {
            return Err(Error::InvalidState(format!(
                "grid holds {} cells, expected {}",
                self.grid.len(),
                expected
            )));
        }

        self.check_registry("ant", Cell::Ant, self.ants.iter().map(|ant| ant.position))?;
        self.check_registry(
            "fruit",
            Cell::Fruit,
            self.fruits.iter().map(|fruit| fruit.position),
        )
    }

    fn check_registry(
        &self,
        label: &str,
        cell: Cell,
        positions: impl Iterator<Item = Position>,
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for pos in positions {
            if self.grid.get(pos) != Some(cell) {
                return Err(Error::InvalidState(format!(
                    "{} at {} is on a {:?} cell",
                    label,
                    pos,
                    self.grid.get(pos)
                )));
            }
            if !seen.insert(pos) {
                return Err(Error::InvalidState(format!(
                    "two {} entries share {}",
                    label, pos
                )));
            }
        }

        let cells = self.grid.count(cell);
        if cells != seen.len() {
            return Err(Error::InvalidState(format!(
                "{} {:?} cells but {} {} entries",
                cells,
                cell,
                seen.len(),
                label
            )));
        }

        Ok(())
    }

    /// Log totals for the run so far
    pub fn log_summary(&self) {
        info!(
            event = "run_summary",
            ticks = self.stats.ticks,
            ants = self.ants.len(),
            fruits = self.fruits.len(),
            moves = self.stats.moves,
            births = self.stats.births,
            conflicts = self.stats.conflicts,
            fruit_eaten = self.stats.fruit_eaten,
            fruit_spawned = self.stats.fruit_spawned,
            "Run summary"
        );
    }
}

impl<R> Simulation<R> {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn fruit_config(&self) -> FruitConfig {
        self.fruit_config
    }

    /// Ticks completed since construction
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.grid)
    }
}
