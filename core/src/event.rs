use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications queued by the simulation for the view layer, in the order they happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    FieldReady,
    PlayerMoved(Coord3),
    ProjectionChanged(Projection),
    CellOpened {
        coords: Coord3,
        neighbor_mine_count: u8,
    },
    CellMarked {
        coords: Coord3,
        marked: bool,
    },
    Detonated(Coord3),
    Won(WinCondition),
    GenerationFailed(GenerationError),
}
