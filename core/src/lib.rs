#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use grid::*;
pub use projection::*;
pub use reveal::*;
pub use simulation::*;
pub use types::*;
pub use win::*;

mod cell;
mod error;
mod event;
mod generator;
mod grid;
mod projection;
mod reveal;
mod simulation;
mod types;
mod win;

/// Shape and mine count of a field, stored by the settings layer under the names shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(rename = "field_size")]
    pub size: Dim,
    #[serde(rename = "layers_count")]
    pub layers: Dim,
    #[serde(rename = "bombs_count")]
    pub explosive_count: CellCount,
}

impl FieldConfig {
    pub const fn new_unchecked(size: Dim, layers: Dim, explosive_count: CellCount) -> Self {
        Self {
            size,
            layers,
            explosive_count,
        }
    }

    pub fn new(size: Dim, layers: Dim, explosive_count: CellCount) -> Self {
        let size = size.clamp(1, Dim::MAX);
        let layers = layers.clamp(1, Dim::MAX);
        let total = Extent::new(size, layers).total_cells();
        let explosive_count = explosive_count.clamp(1, total);
        Self::new_unchecked(size, layers, explosive_count)
    }

    /// Mine count from a density in percent of one layer's area, rounded to the nearest cell with ties to even.
    pub fn with_density(size: Dim, layers: Dim, percent: u32) -> Self {
        let scaled = Extent::new(size, layers).area().saturating_mul(percent);
        let (whole, rest) = (scaled / 100, scaled % 100);
        let explosive_count = if rest > 50 || (rest == 50 && whole % 2 == 1) {
            whole + 1
        } else {
            whole
        };
        Self::new(size, layers, explosive_count)
    }

    /// Inverse of [`FieldConfig::with_density`], truncated.
    pub fn density_percent(&self) -> u32 {
        self.explosive_count
            .saturating_mul(100)
            .checked_div(self.extent().area())
            .unwrap_or(0)
    }

    pub const fn extent(&self) -> Extent {
        Extent::new(self.size, self.layers)
    }

    pub const fn total_cells(&self) -> CellCount {
        self.extent().total_cells()
    }

    /// Explosives placed on `layer`: an even share, with the whole remainder on the last layer.
    pub fn per_layer_quota(&self, layer: Coord) -> CellCount {
        let layers = CellCount::from(self.layers);
        let Some(share) = self.explosive_count.checked_div(layers) else {
            return 0;
        };

        if layer == Coord::from(self.layers) - 1 {
            share + self.explosive_count % layers
        } else {
            share
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 2, 20)
    }
}

/// Result of toggling a mark.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    Won,
}

/// Result of a hit or of cascade wavefronts, ordered from least to most significant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Won,
    Detonated,
}

/// Combines outcomes of consecutive wavefronts, keeping the most significant one.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.max(rhs)
    }
}
