use serde::{Deserialize, Serialize};

use crate::MarkOutcome;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Unrevealed, may be hit or marked.
    Rock,
    /// Revealed, carries the number of explosive siblings counted when it was opened.
    Empty(u8),
    /// Unrevealed mine.
    Explosive,
}

/// What hitting a cell does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitEffect {
    Open,
    Detonate,
    Ignore,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    marked: bool,
    interactive: bool,
}

impl Cell {
    const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            marked: false,
            interactive: false,
        }
    }

    pub const fn rock() -> Self {
        Self::new(CellKind::Rock)
    }

    pub const fn explosive() -> Self {
        Self::new(CellKind::Explosive)
    }

    pub const fn empty(neighbor_mine_count: u8) -> Self {
        Self::new(CellKind::Empty(neighbor_mine_count))
    }

    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn is_rock(&self) -> bool {
        matches!(self.kind, CellKind::Rock)
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self.kind, CellKind::Empty(_))
    }

    pub const fn is_explosive(&self) -> bool {
        matches!(self.kind, CellKind::Explosive)
    }

    pub const fn is_marked(&self) -> bool {
        self.marked
    }

    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub const fn neighbor_mine_count(&self) -> Option<u8> {
        match self.kind {
            CellKind::Empty(count) => Some(count),
            _ => None,
        }
    }

    /// Marked cells ignore hits until unmarked.
    pub const fn on_hit(&self) -> HitEffect {
        match (self.kind, self.marked) {
            (_, true) => HitEffect::Ignore,
            (CellKind::Rock, false) => HitEffect::Open,
            (CellKind::Explosive, false) => HitEffect::Detonate,
            (CellKind::Empty(_), false) => HitEffect::Ignore,
        }
    }

    pub fn toggle_mark(&mut self) -> MarkOutcome {
        match self.kind {
            CellKind::Empty(_) => MarkOutcome::NoChange,
            CellKind::Rock | CellKind::Explosive => {
                self.marked = !self.marked;
                MarkOutcome::Changed
            }
        }
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// The empty cell replacing this rock; marks do not survive opening.
    pub(crate) const fn opened(self, neighbor_mine_count: u8) -> Self {
        Self {
            kind: CellKind::Empty(neighbor_mine_count),
            marked: false,
            interactive: self.interactive,
        }
    }
}
