#![cfg_attr(not(feature = "std"), no_std)]

//! Wolf-and-sheep chase on an unbounded plane.
//!
//! Every round each living sheep takes one random cardinal step, then the wolf
//! either eats the nearest sheep or runs toward it. Dead sheep keep their slot
//! so indices stay meaningful for reporting.

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// A point (or displacement) on the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        #[cfg(feature = "std")]
        {
            (self.x * self.x + self.y * self.y).sqrt()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sqrt(self.x * self.x + self.y * self.y)
        }
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: &Position) -> f64 {
        (*self - *other).magnitude()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl core::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f64> for Position {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f64> for Position {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Position {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// One slot of the herd. A slot never goes back from `Dead` to `Alive`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sheep {
    Alive(Position),
    Dead,
}

impl Sheep {
    pub fn new(position: Position) -> Self {
        Sheep::Alive(position)
    }

    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, init_pos_limit: f64) -> Self {
        let x = rng.gen_range(-init_pos_limit..=init_pos_limit);
        let y = rng.gen_range(-init_pos_limit..=init_pos_limit);
        Sheep::Alive(Position::new(x, y))
    }

    pub fn is_alive(&self) -> bool {
        matches!(self, Sheep::Alive(_))
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Sheep::Alive(position) => Some(*position),
            Sheep::Dead => None,
        }
    }

    /// Tombstone the slot. Killing an already dead sheep is a caller bug.
    pub fn kill(&mut self) {
        debug_assert!(self.is_alive(), "kill called on a dead sheep");
        *self = Sheep::Dead;
    }
}

/// The single pursuer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wolf {
    pub position: Position,
}

impl Wolf {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Default for Wolf {
    fn default() -> Self {
        Self::new(Position::origin())
    }
}

/// Cardinal direction of a sheep step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    pub fn offset(self, distance: f64) -> Position {
        match self {
            Direction::Left => Position::new(-distance, 0.0),
            Direction::Right => Position::new(distance, 0.0),
            Direction::Down => Position::new(0.0, -distance),
            Direction::Up => Position::new(0.0, distance),
        }
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.gen_range(0..4u8) {
            0 => Direction::Left,
            1 => Direction::Right,
            2 => Direction::Down,
            _ => Direction::Up,
        }
    }
}

/// What the wolf did in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Captured,
    Pursued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseEvent {
    pub kind: EventKind,
    /// Slot index of the targeted sheep
    pub index: usize,
}

/// Result of the nearest-sheep search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub index: usize,
    pub distance: f64,
}

/// Per-round transitions over a herd slice
pub mod behavior {
    use super::*;

    /// Move every living sheep one step of `sheep_move_dist` in a random
    /// cardinal direction. Dead slots are left alone.
    pub fn sheep_move<R: Rng + ?Sized>(herd: &mut [Sheep], sheep_move_dist: f64, rng: &mut R) {
        for sheep in herd.iter_mut() {
            if let Sheep::Alive(position) = sheep {
                let direction: Direction = rng.gen();
                *position += direction.offset(sheep_move_dist);
            }
        }
        log::trace!("moved {} sheep by {}", census(herd), sheep_move_dist);
    }

    /// Linear scan for the living sheep closest to `wolf`.
    ///
    /// Ties go to the lowest index. Returns `None` for an all-dead herd.
    pub fn nearest_sheep(herd: &[Sheep], wolf: &Wolf) -> Option<Nearest> {
        let mut nearest: Option<Nearest> = None;
        for (index, sheep) in herd.iter().enumerate() {
            let Sheep::Alive(position) = sheep else {
                continue;
            };
            let distance = wolf.position.distance(position);
            if nearest.map_or(true, |best| distance < best.distance) {
                nearest = Some(Nearest { index, distance });
            }
        }
        log::trace!("nearest sheep: {:?}", nearest);
        nearest
    }

    /// Capture the nearest sheep if it is within `wolf_move_dist`, otherwise
    /// move the wolf `wolf_move_dist` straight toward it.
    ///
    /// Returns `None` (and leaves everything untouched) when no sheep is alive.
    pub fn wolf_move(herd: &mut [Sheep], wolf: &mut Wolf, wolf_move_dist: f64) -> Option<ChaseEvent> {
        let Nearest { index, distance } = nearest_sheep(herd, wolf)?;
        let target = herd[index].position()?;

        let kind = if distance <= wolf_move_dist {
            wolf.position = target;
            herd[index].kill();
            EventKind::Captured
        } else {
            wolf.position += (target - wolf.position) / distance * wolf_move_dist;
            EventKind::Pursued
        };

        log::debug!("wolf {:?} sheep {} at distance {}", kind, index, distance);
        Some(ChaseEvent { kind, index })
    }

    /// Number of living sheep
    pub fn census(herd: &[Sheep]) -> usize {
        herd.iter().filter(|sheep| sheep.is_alive()).count()
    }
}

pub use behavior::census;

/// Parameters of a chase run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseConfig {
    pub sheep_count: usize,
    pub init_pos_limit: f64,
    pub sheep_move_dist: f64,
    pub wolf_move_dist: f64,
    pub max_rounds: u32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            sheep_count: 15,
            init_pos_limit: 10.0,
            sheep_move_dist: 0.5,
            wolf_move_dist: 1.0,
            max_rounds: 50,
        }
    }
}

/// Read-only view of the world at the end of a round
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub round: u32,
    pub wolf: Position,
    /// One entry per slot, `None` for dead sheep
    pub sheep: Vec<Option<Position>>,
}

#[cfg(feature = "std")]
impl Snapshot {
    pub fn capture(round: u32, wolf: &Wolf, herd: &[Sheep]) -> Self {
        Self {
            round,
            wolf: wolf.position,
            sheep: herd.iter().map(Sheep::position).collect(),
        }
    }
}

/// Everything a round produced
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub event: ChaseEvent,
    pub snapshot: Snapshot,
    pub alive: usize,
}

/// Place the wolf at the origin and scatter `sheep_count` sheep uniformly in
/// `[-init_pos_limit, init_pos_limit]` on both axes.
#[cfg(feature = "std")]
pub fn initialize<R: Rng + ?Sized>(
    sheep_count: usize,
    init_pos_limit: f64,
    rng: &mut R,
) -> (Wolf, Vec<Sheep>) {
    let herd = (0..sheep_count)
        .map(|_| Sheep::random(rng, init_pos_limit))
        .collect();
    (Wolf::default(), herd)
}

/// Run one round: sheep step, wolf acts, survivors are counted.
///
/// Returns `None` if the herd was already extinct; nothing is moved then.
#[cfg(feature = "std")]
pub fn run_round<R: Rng + ?Sized>(
    round: u32,
    wolf: &mut Wolf,
    herd: &mut [Sheep],
    sheep_move_dist: f64,
    wolf_move_dist: f64,
    rng: &mut R,
) -> Option<RoundReport> {
    if census(herd) == 0 {
        return None;
    }
    behavior::sheep_move(herd, sheep_move_dist, rng);
    let event = behavior::wolf_move(herd, wolf, wolf_move_dist)?;
    let alive = census(herd);
    Some(RoundReport {
        event,
        snapshot: Snapshot::capture(round, wolf, herd),
        alive,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No sheep left before a round could start
    Extinction,
    /// The configured number of rounds has been played
    RoundLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseState {
    Running,
    Terminated(Termination),
}

/// Round scheduler owning the wolf, the herd and the random source
#[cfg(feature = "std")]
pub struct Chase<R: Rng> {
    config: ChaseConfig,
    wolf: Wolf,
    herd: Vec<Sheep>,
    rng: R,
    round: u32,
    state: ChaseState,
}

#[cfg(feature = "std")]
impl<R: Rng> Chase<R> {
    pub fn new(config: ChaseConfig, mut rng: R) -> Self {
        let (wolf, herd) = initialize(config.sheep_count, config.init_pos_limit, &mut rng);
        Self::from_parts(config, wolf, herd, rng)
    }

    /// Start from a hand-placed wolf and herd. `config.sheep_count` is ignored.
    pub fn from_parts(config: ChaseConfig, wolf: Wolf, herd: Vec<Sheep>, rng: R) -> Self {
        Self {
            config,
            wolf,
            herd,
            rng,
            round: 0,
            state: ChaseState::Running,
        }
    }

    /// Play the next round, or terminate and return `None`.
    pub fn step(&mut self) -> Option<RoundReport> {
        if self.state != ChaseState::Running {
            return None;
        }
        if self.round >= self.config.max_rounds {
            self.terminate(Termination::RoundLimit);
            return None;
        }
        if census(&self.herd) == 0 {
            self.terminate(Termination::Extinction);
            return None;
        }

        let round = self.round + 1;
        let report = run_round(
            round,
            &mut self.wolf,
            &mut self.herd,
            self.config.sheep_move_dist,
            self.config.wolf_move_dist,
            &mut self.rng,
        )?;
        self.round = round;
        Some(report)
    }

    /// Number of the round `step` would play next, or `None` if it would
    /// terminate instead. Does not change any state.
    pub fn next_round(&self) -> Option<u32> {
        let playable = self.state == ChaseState::Running
            && self.round < self.config.max_rounds
            && census(&self.herd) > 0;
        playable.then_some(self.round + 1)
    }

    fn terminate(&mut self, reason: Termination) {
        log::debug!("chase terminated after round {}: {:?}", self.round, reason);
        self.state = ChaseState::Terminated(reason);
    }

    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    pub fn state(&self) -> ChaseState {
        self.state
    }

    pub fn termination(&self) -> Option<Termination> {
        match self.state {
            ChaseState::Running => None,
            ChaseState::Terminated(reason) => Some(reason),
        }
    }

    /// Number of completed rounds
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn wolf(&self) -> &Wolf {
        &self.wolf
    }

    pub fn herd(&self) -> &[Sheep] {
        &self.herd
    }

    pub fn alive(&self) -> usize {
        census(&self.herd)
    }
}

#[cfg(feature = "std")]
impl<R: Rng> Iterator for Chase<R> {
    type Item = RoundReport;

    fn next(&mut self) -> Option<RoundReport> {
        self.step()
    }
}
