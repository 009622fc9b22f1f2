use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCount, Coord, Coord3};

/// Reasons a field could not be generated. No partially mined grid is ever returned alongside these.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationError {
    #[error("Start coordinates {0} lie outside the field")]
    InvalidStart(Coord3),
    #[error("Layer {layer} cannot hold {requested} explosives, only {available} cells are free")]
    NotEnoughCells {
        layer: Coord,
        requested: CellCount,
        available: CellCount,
    },
    #[error("Explosive at {0} is outside the field, on the start cell or repeated")]
    InvalidExplosive(Coord3),
    #[error("Layer {layer} should hold {expected} explosives but the layout places {actual}")]
    InvalidLayout {
        layer: Coord,
        expected: CellCount,
        actual: CellCount,
    },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new commands are accepted")]
    AlreadyEnded,
    #[error("No level has been generated")]
    NoLevel,
    #[error("A reveal cascade is still in progress")]
    CascadeInProgress,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl GameError {
    /// Whether this is a rejected command rather than a failed generation.
    pub const fn is_invalid_command(self) -> bool {
        !matches!(self, Self::Generation(_))
    }
}

pub type Result<T, E = GameError> = core::result::Result<T, E>;
