use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// How much of a cascade a hit runs before returning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadePacing {
    /// The whole cascade runs inside the hit.
    #[default]
    Instant,
    /// The hit opens its own cell, further wavefronts wait for [`Simulation::tick`].
    Wavefront,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOptions {
    pub cascade_pacing: CascadePacing,
    /// Hit the start cell as soon as the field is ready.
    pub open_start: bool,
}

/// Valid transitions:
/// - Ready -> Active
/// - Ready -> Won
/// - Ready -> Lost
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub coords: Coord3,
    pub projection: Projection,
}

#[derive(Clone, Debug)]
struct Level {
    config: FieldConfig,
    grid: Grid,
    player: PlayerState,
    state: GameState,
    cascade: Option<Cascade>,
    triggered_explosive: Option<Coord3>,
}

impl Level {
    fn new(config: FieldConfig, grid: Grid, start: Coord3) -> Self {
        let mut level = Self {
            config,
            grid,
            player: PlayerState {
                coords: start,
                projection: Projection::IDENTITY,
            },
            state: Default::default(),
            cascade: None,
            triggered_explosive: None,
        };
        level.refresh_interactive();
        level
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    /// Only cells in the player's visible slice accept commands.
    fn refresh_interactive(&mut self) {
        let PlayerState { coords, projection } = self.player;
        for (pos, cell) in self.grid.iter_mut() {
            cell.set_interactive(projection.shares_slice(coords, pos));
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = GameState::Active;
        }
    }

    fn move_by(&mut self, delta: (Coord, Coord), events: &mut VecDeque<Event>) -> Result<Coord3> {
        let target = self
            .player
            .projection
            .project_delta(self.player.coords, delta)
            .filter(|&target| self.grid.contains(target))
            .ok_or(GameError::InvalidCoords)?;

        self.player.coords = target;
        events.push_back(Event::PlayerMoved(target));
        Ok(target)
    }

    fn rotate(&mut self, direction: Direction, events: &mut VecDeque<Event>) -> Projection {
        self.player.projection.rotate(direction);
        let projection = self.player.projection;
        log::debug!(
            "Rotated {:?}, now looking along {:?}",
            direction,
            projection.forward()
        );

        self.refresh_interactive();
        events.push_back(Event::ProjectionChanged(projection));
        projection
    }

    fn hit(&mut self, pacing: CascadePacing, events: &mut VecDeque<Event>) -> Result<RevealOutcome> {
        if self.cascade.is_some() {
            return Err(GameError::CascadeInProgress);
        }

        let coords = self.player.coords;
        let effect = self
            .grid
            .get(coords)
            .ok_or(GameError::InvalidCoords)?
            .on_hit();

        match effect {
            HitEffect::Ignore => {
                log::debug!("Hit at {} changed nothing", coords);
                Ok(RevealOutcome::NoChange)
            }
            HitEffect::Detonate => {
                log::debug!("Detonated explosive at {}", coords);
                self.state = GameState::Lost;
                self.triggered_explosive = Some(coords);
                events.push_back(Event::Detonated(coords));
                Ok(RevealOutcome::Detonated)
            }
            HitEffect::Open => {
                log::debug!("Hit rock at {}", coords);
                self.mark_started();

                let mut cascade = Cascade::new(coords, self.player.projection);
                let outcome = self.advance(&mut cascade, events);
                Ok(match pacing {
                    CascadePacing::Instant => outcome | self.drain(&mut cascade, events),
                    CascadePacing::Wavefront => {
                        if !cascade.is_finished() && !self.state.is_finished() {
                            self.cascade = Some(cascade);
                        }
                        outcome
                    }
                })
            }
        }
    }

    fn mark(&mut self, coords: Coord3, events: &mut VecDeque<Event>) -> Result<MarkOutcome> {
        let cell = self.grid.get_mut(coords).ok_or(GameError::InvalidCoords)?;
        if cell.toggle_mark() == MarkOutcome::NoChange {
            return Ok(MarkOutcome::NoChange);
        }

        let marked = cell.is_marked();
        events.push_back(Event::CellMarked { coords, marked });
        self.mark_started();

        Ok(if self.poll_win(events) {
            MarkOutcome::Won
        } else {
            MarkOutcome::Changed
        })
    }

    fn tick(&mut self, events: &mut VecDeque<Event>) -> RevealOutcome {
        let Some(mut cascade) = self.cascade.take() else {
            return RevealOutcome::NoChange;
        };

        let outcome = self.advance(&mut cascade, events);
        if !cascade.is_finished() && !self.state.is_finished() {
            self.cascade = Some(cascade);
        }
        outcome
    }

    fn finish_cascade(&mut self, events: &mut VecDeque<Event>) -> RevealOutcome {
        match self.cascade.take() {
            Some(mut cascade) => self.drain(&mut cascade, events),
            None => RevealOutcome::NoChange,
        }
    }

    fn drain(&mut self, cascade: &mut Cascade, events: &mut VecDeque<Event>) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        while !cascade.is_finished() && !self.state.is_finished() {
            outcome = outcome | self.advance(cascade, events);
        }
        outcome
    }

    /// Opens one wavefront and polls for a win at its boundary.
    fn advance(&mut self, cascade: &mut Cascade, events: &mut VecDeque<Event>) -> RevealOutcome {
        let opened = cascade.step(&mut self.grid, |coords, neighbor_mine_count| {
            events.push_back(Event::CellOpened {
                coords,
                neighbor_mine_count,
            })
        });

        if self.poll_win(events) {
            RevealOutcome::Won
        } else if opened > 0 {
            RevealOutcome::Revealed
        } else {
            RevealOutcome::NoChange
        }
    }

    fn poll_win(&mut self, events: &mut VecDeque<Event>) -> bool {
        let Some(condition) = check_win(&self.grid) else {
            return false;
        };

        log::debug!("Field won: {:?}", condition);
        self.state = GameState::Won;
        self.cascade = None;
        events.push_back(Event::Won(condition));
        true
    }
}

/// Owns the current level and queues the events it produces.
///
/// Commands are applied one at a time through `&mut self`; the view layer reads the grid and drains events between
/// them.
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    options: SimulationOptions,
    level: Option<Level>,
    events: VecDeque<Event>,
}

impl Simulation {
    pub fn new(options: SimulationOptions) -> Self {
        Self {
            options,
            level: None,
            events: VecDeque::new(),
        }
    }

    pub fn options(&self) -> SimulationOptions {
        self.options
    }

    /// Replaces the current level with a freshly generated one.
    ///
    /// On failure the previous level is gone too, so no half-built field is ever playable.
    pub fn start_level(
        &mut self,
        config: FieldConfig,
        start: Coord3,
        generator: impl FieldGenerator,
    ) -> Result<()> {
        self.level = None;

        let grid = match generator.generate(config, start) {
            Ok(grid) => grid,
            Err(err) => {
                log::warn!("Field generation failed: {}", err);
                self.events.push_back(Event::GenerationFailed(err));
                return Err(err.into());
            }
        };

        log::debug!("Level ready: {:?}, starting at {}", config, start);
        let level = Level::new(config, grid, start);
        self.events.extend([
            Event::FieldReady,
            Event::PlayerMoved(start),
            Event::ProjectionChanged(level.player.projection),
        ]);
        self.level = Some(level);

        if self.options.open_start {
            self.hit_current_cell()?;
        }
        Ok(())
    }

    pub fn has_level(&self) -> bool {
        self.level.is_some()
    }

    pub fn config(&self) -> Option<FieldConfig> {
        self.level.as_ref().map(|level| level.config)
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.level.as_ref().map(|level| &level.grid)
    }

    pub fn player(&self) -> Option<PlayerState> {
        self.level.as_ref().map(|level| level.player)
    }

    pub fn state(&self) -> Option<GameState> {
        self.level.as_ref().map(|level| level.state)
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_some_and(GameState::is_finished)
    }

    pub fn is_cascading(&self) -> bool {
        self.level
            .as_ref()
            .is_some_and(|level| level.cascade.is_some())
    }

    pub fn triggered_explosive(&self) -> Option<Coord3> {
        self.level.as_ref()?.triggered_explosive
    }

    /// Cells not opened yet, explosives included.
    pub fn remaining_cells(&self) -> CellCount {
        self.grid()
            .map_or(0, |grid| grid.len() as CellCount - grid.empty_count())
    }

    /// How many explosives have not been marked yet, negative when there are more marks than explosives.
    pub fn explosives_left(&self) -> isize {
        self.grid().map_or(0, |grid| {
            (grid.explosive_count() as isize) - (grid.marked_count() as isize)
        })
    }

    /// Cells of the slice the player currently sees.
    pub fn visible_cells(&self) -> impl Iterator<Item = (Coord3, &Cell)> {
        self.level.iter().flat_map(|level| {
            let PlayerState { coords, projection } = level.player;
            level
                .grid
                .iter()
                .filter(move |&(pos, _)| projection.shares_slice(coords, pos))
        })
    }

    /// Explosive siblings of an opened cell under the current frame, which may differ from its stored count.
    pub fn display_count(&self, coords: Coord3) -> Option<u8> {
        let level = self.level.as_ref()?;
        let cell = level.grid.get(coords)?;
        cell.is_empty()
            .then(|| level.grid.count_explosive_siblings(coords, level.player.projection))
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    fn level_mut(&mut self) -> Result<(&mut Level, &mut VecDeque<Event>)> {
        let level = self.level.as_mut().ok_or(GameError::NoLevel)?;
        level.check_not_finished()?;
        Ok((level, &mut self.events))
    }

    /// Moves the player by `(dx, dy)` along the frame's right and up vectors.
    pub fn move_by(&mut self, delta: (Coord, Coord)) -> Result<Coord3> {
        let (level, events) = self.level_mut()?;
        level.move_by(delta, events)
    }

    pub fn rotate(&mut self, direction: Direction) -> Result<Projection> {
        let (level, events) = self.level_mut()?;
        Ok(level.rotate(direction, events))
    }

    pub fn hit_current_cell(&mut self) -> Result<RevealOutcome> {
        let pacing = self.options.cascade_pacing;
        let (level, events) = self.level_mut()?;
        level.hit(pacing, events)
    }

    pub fn mark_current_cell(&mut self) -> Result<MarkOutcome> {
        let (level, events) = self.level_mut()?;
        let coords = level.player.coords;
        level.mark(coords, events)
    }

    pub fn mark_cell(&mut self, coords: Coord3) -> Result<MarkOutcome> {
        let (level, events) = self.level_mut()?;
        level.mark(coords, events)
    }

    /// Opens the next wavefront of a paced cascade.
    pub fn tick(&mut self) -> Result<RevealOutcome> {
        let (level, events) = self.level_mut()?;
        Ok(level.tick(events))
    }

    pub fn finish_cascade(&mut self) -> Result<RevealOutcome> {
        let (level, events) = self.level_mut()?;
        Ok(level.finish_cascade(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn fixed_level(
        options: SimulationOptions,
        (size, layers): (Dim, Dim),
        mines: &[Coord3],
        start: Coord3,
    ) -> Simulation {
        let mut sim = Simulation::new(options);
        let config = FieldConfig::new(size, layers, mines.len() as CellCount);
        sim.start_level(config, start, FixedFieldGenerator::new(mines.iter().copied()))
            .unwrap();
        sim.drain_events().for_each(drop);
        sim
    }

    fn level(shape: (Dim, Dim), mines: &[Coord3]) -> Simulation {
        fixed_level(Default::default(), shape, mines, Coord3::ORIGIN)
    }

    fn paced() -> SimulationOptions {
        SimulationOptions {
            cascade_pacing: CascadePacing::Wavefront,
            ..Default::default()
        }
    }

    fn events(sim: &mut Simulation) -> Vec<Event> {
        sim.drain_events().collect()
    }

    fn opened(events: &[Event]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, Event::CellOpened { .. }))
            .count()
    }

    #[test]
    fn default_field_is_reproducible() {
        let run = |seed| {
            let mut sim = Simulation::default();
            sim.start_level(FieldConfig::default(), Coord3::ORIGIN, RandomFieldGenerator::new(seed))
                .unwrap();

            let grid = sim.grid().unwrap();
            assert_eq!(grid.len(), 200);
            assert_eq!(grid.explosives_in_layer(0), 10);
            assert_eq!(grid.explosives_in_layer(1), 10);
            assert_eq!(grid.get(Coord3::ORIGIN).map(Cell::kind), Some(CellKind::Rock));
            assert!(grid.get(Coord3::ORIGIN).is_some_and(Cell::is_interactive));
            assert_eq!(
                events(&mut sim),
                [
                    Event::FieldReady,
                    Event::PlayerMoved(Coord3::ORIGIN),
                    Event::ProjectionChanged(Projection::IDENTITY),
                ]
            );

            assert_eq!(sim.hit_current_cell(), Ok(RevealOutcome::Revealed));
            let grid = sim.grid().unwrap();
            let expected = grid.count_explosive_siblings(Coord3::ORIGIN, Projection::IDENTITY);
            let opened_events = events(&mut sim);
            assert_eq!(
                opened_events[0],
                Event::CellOpened {
                    coords: Coord3::ORIGIN,
                    neighbor_mine_count: expected,
                }
            );
            if expected > 0 {
                assert_eq!(opened_events.len(), 1);
            }
            assert!(opened_events.iter().all(|event| match event {
                Event::CellOpened { coords, .. } => coords.z == 0,
                _ => false,
            }));
            opened_events
        };

        for seed in [1, 2, 3] {
            assert_eq!(run(seed), run(seed));
        }
    }

    #[test]
    fn detonation_ends_level() {
        let mine = Coord3::new(1, 1, 0);
        let mut sim = level((3, 1), &[mine]);

        assert_eq!(sim.move_by((1, 1)), Ok(mine));
        assert_eq!(sim.hit_current_cell(), Ok(RevealOutcome::Detonated));
        assert_eq!(
            events(&mut sim),
            [Event::PlayerMoved(mine), Event::Detonated(mine)]
        );
        assert_eq!(sim.state(), Some(GameState::Lost));
        assert_eq!(sim.triggered_explosive(), Some(mine));

        assert_eq!(sim.hit_current_cell(), Err(GameError::AlreadyEnded));
        assert_eq!(sim.mark_current_cell(), Err(GameError::AlreadyEnded));
        assert_eq!(sim.move_by((-1, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(sim.rotate(Direction::Top), Err(GameError::AlreadyEnded));
        assert!(events(&mut sim).is_empty());
    }

    #[test]
    fn marking_every_explosive_wins() {
        let mines = [Coord3::new(1, 1, 0), Coord3::new(0, 1, 1)];
        let mut sim = level((3, 2), &mines);

        assert_eq!(sim.mark_cell(mines[0]), Ok(MarkOutcome::Changed));
        assert_eq!(sim.state(), Some(GameState::Active));
        assert_eq!(sim.mark_cell(mines[1]), Ok(MarkOutcome::Won));

        assert_eq!(
            events(&mut sim),
            [
                Event::CellMarked {
                    coords: mines[0],
                    marked: true,
                },
                Event::CellMarked {
                    coords: mines[1],
                    marked: true,
                },
                Event::Won(WinCondition::AllMarked),
            ]
        );
        assert_eq!(sim.state(), Some(GameState::Won));
        assert_eq!(sim.grid().unwrap().empty_count(), 0);
        assert_eq!(sim.hit_current_cell(), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn mark_outside_field_is_rejected() {
        let mut sim = level((3, 1), &[Coord3::new(1, 1, 0)]);

        assert_eq!(
            sim.mark_cell(Coord3::new(5, 5, 5)),
            Err(GameError::InvalidCoords)
        );
        assert!(GameError::InvalidCoords.is_invalid_command());
        assert_eq!(sim.state(), Some(GameState::Ready));
    }

    #[test]
    fn opening_every_safe_cell_wins() {
        let mut sim = level((5, 1), &[Coord3::new(2, 2, 0)]);

        assert_eq!(sim.hit_current_cell(), Ok(RevealOutcome::Won));

        let events = events(&mut sim);
        assert_eq!(opened(&events), 24);
        assert_eq!(events.last(), Some(&Event::Won(WinCondition::Cleared)));
        assert_eq!(sim.state(), Some(GameState::Won));
        assert_eq!(sim.remaining_cells(), 1);
        assert_eq!(sim.grid().unwrap().marked_count(), 0);
    }

    #[test]
    fn marked_cell_ignores_hit() {
        let mut sim = level((3, 1), &[Coord3::new(1, 1, 0)]);

        assert_eq!(sim.mark_current_cell(), Ok(MarkOutcome::Changed));
        assert_eq!(sim.hit_current_cell(), Ok(RevealOutcome::NoChange));
        assert_eq!(sim.grid().unwrap().get(Coord3::ORIGIN).unwrap().kind(), CellKind::Rock);

        assert_eq!(sim.mark_current_cell(), Ok(MarkOutcome::Changed));
        assert_eq!(sim.hit_current_cell(), Ok(RevealOutcome::Revealed));
        assert_eq!(sim.mark_current_cell(), Ok(MarkOutcome::NoChange));
        assert_eq!(sim.hit_current_cell(), Ok(RevealOutcome::NoChange));
    }

    #[test]
    fn paced_cascade_matches_instant_one() {
        let mines = [Coord3::new(2, 2, 0)];
        let mut instant = level((5, 1), &mines);
        instant.hit_current_cell().unwrap();

        let mut sim = fixed_level(paced(), (5, 1), &mines, Coord3::ORIGIN);
        assert_eq!(sim.hit_current_cell(), Ok(RevealOutcome::Revealed));
        assert!(sim.is_cascading());
        assert_eq!(opened(&events(&mut sim)), 1);

        assert_eq!(sim.hit_current_cell(), Err(GameError::CascadeInProgress));
        assert_eq!(sim.move_by((1, 0)), Ok(Coord3::new(1, 0, 0)));

        assert_eq!(sim.tick(), Ok(RevealOutcome::Revealed));
        assert_eq!(opened(&events(&mut sim)), 8);

        assert_eq!(sim.finish_cascade(), Ok(RevealOutcome::Won));
        assert!(!sim.is_cascading());
        assert_eq!(sim.grid(), instant.grid());
        assert_eq!(sim.tick(), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn paced_cascade_keeps_its_frame() {
        let mines = [Coord3::new(1, 1, 0), Coord3::new(1, 1, 1)];
        let start = Coord3::new(-1, -1, 0);
        let mut sim = fixed_level(paced(), (3, 2), &mines, start);

        sim.hit_current_cell().unwrap();
        sim.rotate(Direction::Top).unwrap();
        while sim.is_cascading() {
            sim.tick().unwrap();
        }

        let events = events(&mut sim);
        assert_eq!(opened(&events), 8);
        assert!(events.iter().all(|event| match event {
            Event::CellOpened { coords, .. } => coords.z == 0,
            _ => true,
        }));
    }

    #[test]
    fn tick_without_cascade_changes_nothing() {
        let mut sim = level((3, 1), &[Coord3::new(1, 1, 0)]);

        assert_eq!(sim.tick(), Ok(RevealOutcome::NoChange));
        assert_eq!(sim.finish_cascade(), Ok(RevealOutcome::NoChange));
        assert_eq!(sim.state(), Some(GameState::Ready));
    }

    #[test]
    fn failed_generation_blocks_level() {
        let mut sim = level((3, 1), &[Coord3::new(1, 1, 0)]);
        let expected = GenerationError::NotEnoughCells {
            layer: 0,
            requested: 9,
            available: 8,
        };

        let result = sim.start_level(
            FieldConfig::new_unchecked(3, 1, 9),
            Coord3::ORIGIN,
            RandomFieldGenerator::new(5),
        );

        assert_eq!(result, Err(GameError::Generation(expected)));
        assert!(!GameError::Generation(expected).is_invalid_command());
        assert_eq!(events(&mut sim), [Event::GenerationFailed(expected)]);
        assert!(!sim.has_level());
        assert_eq!(sim.hit_current_cell(), Err(GameError::NoLevel));
        assert_eq!(sim.visible_cells().count(), 0);
    }

    #[test]
    fn new_level_replaces_finished_one() {
        let mine = Coord3::new(1, 1, 0);
        let mut sim = level((3, 1), &[mine]);
        sim.move_by((1, 1)).unwrap();
        sim.hit_current_cell().unwrap();

        sim.start_level(FieldConfig::new(3, 1, 1), Coord3::ORIGIN, RandomFieldGenerator::new(8))
            .unwrap();

        assert_eq!(sim.state(), Some(GameState::Ready));
        assert_eq!(sim.triggered_explosive(), None);
        assert_eq!(sim.player().unwrap().coords, Coord3::ORIGIN);
    }

    #[test]
    fn moves_follow_frame_and_stay_on_field() {
        let mines = [Coord3::new(1, 1, 0), Coord3::new(1, 1, 1), Coord3::new(1, 1, 2)];
        let mut sim = level((3, 3), &mines);

        assert_eq!(sim.move_by((0, 1)), Ok(Coord3::new(0, 1, 0)));
        assert_eq!(sim.move_by((0, 1)), Err(GameError::InvalidCoords));
        assert_eq!(sim.player().unwrap().coords, Coord3::new(0, 1, 0));

        sim.rotate(Direction::Top).unwrap();
        assert_eq!(sim.move_by((0, 1)), Ok(Coord3::new(0, 1, 1)));
        assert_eq!(sim.move_by((0, -2)), Err(GameError::InvalidCoords));
        assert_eq!(
            events(&mut sim),
            [
                Event::PlayerMoved(Coord3::new(0, 1, 0)),
                Event::ProjectionChanged(Projection::IDENTITY.apply(Direction::Top)),
                Event::PlayerMoved(Coord3::new(0, 1, 1)),
            ]
        );
    }

    #[test]
    fn move_far_outside_field_is_rejected() {
        let start = Coord3::new(1, 0, 0);
        let mut sim = fixed_level(Default::default(), (3, 1), &[Coord3::new(-1, 1, 0)], start);

        assert_eq!(sim.move_by((Coord::MAX, 0)), Err(GameError::InvalidCoords));
        assert_eq!(sim.move_by((Coord::MIN, Coord::MIN)), Err(GameError::InvalidCoords));
        assert_eq!(sim.player().unwrap().coords, start);
        assert!(events(&mut sim).is_empty());

        sim.rotate(Direction::Left).unwrap();
        assert_eq!(sim.move_by((Coord::MIN, 0)), Err(GameError::InvalidCoords));
        assert_eq!(sim.state(), Some(GameState::Ready));
    }

    #[test]
    fn rotation_redisplays_without_mutating() {
        let mines = [Coord3::new(1, 1, 0), Coord3::new(0, 1, 1)];
        let mut sim = level((3, 2), &mines);
        sim.hit_current_cell().unwrap();
        let stored_kind = |sim: &Simulation| sim.grid().unwrap().get(Coord3::ORIGIN).map(Cell::kind);

        assert_eq!(sim.display_count(Coord3::ORIGIN), Some(1));

        sim.rotate(Direction::Top).unwrap();
        assert_eq!(sim.display_count(Coord3::ORIGIN), Some(0));
        assert_eq!(stored_kind(&sim), Some(CellKind::Empty(1)));

        sim.rotate(Direction::Bottom).unwrap();
        sim.rotate(Direction::Right).unwrap();
        assert_eq!(sim.display_count(Coord3::ORIGIN), Some(1));
        assert_eq!(sim.display_count(Coord3::new(1, 0, 0)), None);
        assert_eq!(sim.display_count(Coord3::new(4, 0, 0)), None);
    }

    #[test]
    fn interactive_cells_follow_visible_slice() {
        let mines = [Coord3::new(1, 1, 0), Coord3::new(0, 1, 1)];
        let mut sim = level((3, 2), &mines);
        let is_interactive =
            |sim: &Simulation, coords| sim.grid().unwrap().get(coords).unwrap().is_interactive();

        assert_eq!(sim.visible_cells().count(), 9);
        assert!(sim.visible_cells().all(|(pos, _)| pos.z == 0));
        assert!(is_interactive(&sim, Coord3::new(1, 1, 0)));
        assert!(!is_interactive(&sim, Coord3::new(1, 0, 1)));

        sim.rotate(Direction::Top).unwrap();

        assert_eq!(sim.visible_cells().count(), 6);
        assert!(sim.visible_cells().all(|(pos, cell)| pos.y == 0 && cell.is_interactive()));
        assert!(is_interactive(&sim, Coord3::new(1, 0, 1)));
        assert!(!is_interactive(&sim, Coord3::new(1, 1, 0)));
    }

    #[test]
    fn open_start_reveals_on_ready() {
        let options = SimulationOptions {
            open_start: true,
            ..Default::default()
        };
        let mines = [Coord3::new(1, 1, 0), Coord3::new(1, 1, 1)];
        let mut sim = Simulation::new(options);

        sim.start_level(
            FieldConfig::new(3, 2, 2),
            Coord3::ORIGIN,
            FixedFieldGenerator::new(mines),
        )
        .unwrap();

        assert_eq!(
            events(&mut sim),
            [
                Event::FieldReady,
                Event::PlayerMoved(Coord3::ORIGIN),
                Event::ProjectionChanged(Projection::IDENTITY),
                Event::CellOpened {
                    coords: Coord3::ORIGIN,
                    neighbor_mine_count: 1,
                },
            ]
        );
        assert_eq!(sim.state(), Some(GameState::Active));
    }

    #[test]
    fn counters_track_progress() {
        let mut sim = level((3, 1), &[Coord3::new(1, 1, 0)]);

        assert_eq!(sim.remaining_cells(), 9);
        assert_eq!(sim.explosives_left(), 1);

        sim.hit_current_cell().unwrap();
        assert_eq!(sim.remaining_cells(), 8);

        sim.mark_cell(Coord3::new(-1, -1, 0)).unwrap();
        assert_eq!(sim.explosives_left(), 0);
        sim.mark_cell(Coord3::new(-1, 1, 0)).unwrap();
        assert_eq!(sim.explosives_left(), -1);
    }
}
