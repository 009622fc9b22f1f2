use alloc::vec::Vec;
use core::mem;
use hashbrown::HashSet;

use crate::*;

/// Flood fill that opens rock cells one wavefront at a time.
///
/// The first wavefront is the hit cell itself. Each zero-count cell opened in a wavefront queues its remaining rock
/// siblings for the next one, and every coordinate is visited at most once, so the cascade ends even though sibling
/// relations form cycles. Adjacency is fixed to the frame active when the cascade started.
#[derive(Clone, Debug)]
pub struct Cascade {
    projection: Projection,
    frontier: Vec<Coord3>,
    visited: HashSet<Coord3>,
    opened: CellCount,
    wavefronts: u32,
}

impl Cascade {
    pub fn new(origin: Coord3, projection: Projection) -> Self {
        Self {
            projection,
            frontier: alloc::vec![origin],
            visited: HashSet::new(),
            opened: 0,
            wavefronts: 0,
        }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Cells opened so far.
    pub fn opened(&self) -> CellCount {
        self.opened
    }

    pub fn wavefronts(&self) -> u32 {
        self.wavefronts
    }

    /// Opens the pending wavefront, reporting each opened cell, and returns how many were opened.
    pub fn step(&mut self, grid: &mut Grid, mut on_open: impl FnMut(Coord3, u8)) -> CellCount {
        let wave = mem::take(&mut self.frontier);
        let mut opened = 0;

        for coords in wave {
            if !self.visited.insert(coords) {
                continue;
            }

            let Some(&cell) = grid.get(coords) else {
                continue;
            };
            if !cell.is_rock() {
                log::trace!("Skipping cell at {}", coords);
                continue;
            }

            let count = grid.count_explosive_siblings(coords, self.projection);
            grid.replace(coords, cell.opened(count));
            opened += 1;
            on_open(coords, count);
            log::trace!("Opened cell at {}, explosive siblings: {}", coords, count);

            if count == 0 {
                let next = grid
                    .rock_siblings(coords, self.projection)
                    .into_iter()
                    .filter(|pos| !self.visited.contains(pos));
                self.frontier.extend(next);
            }
        }

        self.opened += opened;
        self.wavefronts += 1;
        log::trace!(
            "Wavefront {} opened {} cells, {} queued",
            self.wavefronts,
            opened,
            self.frontier.len()
        );
        opened
    }

    /// Runs the remaining wavefronts and returns how many cells they opened.
    pub fn run(&mut self, grid: &mut Grid, mut on_open: impl FnMut(Coord3, u8)) -> CellCount {
        let mut opened = 0;
        while !self.is_finished() {
            opened += self.step(grid, &mut on_open);
        }
        opened
    }
}
