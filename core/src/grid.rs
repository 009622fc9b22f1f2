use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::*;

/// Sparse store of every cell in a field.
///
/// Cells are only inserted while a generator assembles the grid; afterwards the number of cells never changes and
/// cells can only be replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    extent: Extent,
    cells: HashMap<Coord3, Cell>,
}

impl Grid {
    pub(crate) fn with_extent(extent: Extent) -> Self {
        Self {
            extent,
            cells: HashMap::with_capacity(extent.total_cells() as usize),
        }
    }

    pub(crate) fn insert(&mut self, coords: Coord3, cell: Cell) {
        self.cells.insert(coords, cell);
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, coords: Coord3) -> Option<&Cell> {
        self.cells.get(&coords)
    }

    pub(crate) fn get_mut(&mut self, coords: Coord3) -> Option<&mut Cell> {
        self.cells.get_mut(&coords)
    }

    pub fn contains(&self, coords: Coord3) -> bool {
        self.cells.contains_key(&coords)
    }

    /// Swaps the cell at `coords`, returning the previous one. Absent coordinates are left absent.
    pub fn replace(&mut self, coords: Coord3, cell: Cell) -> Option<Cell> {
        self.cells
            .get_mut(&coords)
            .map(|slot| core::mem::replace(slot, cell))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord3, &Cell)> {
        self.cells.iter().map(|(&coords, cell)| (coords, cell))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Coord3, &mut Cell)> {
        self.cells.iter_mut().map(|(&coords, cell)| (coords, cell))
    }

    /// Siblings of `coords` under `projection` that exist in the grid.
    pub fn siblings(
        &self,
        coords: Coord3,
        projection: Projection,
    ) -> impl Iterator<Item = (Coord3, &Cell)> {
        projection
            .siblings(coords)
            .filter_map(|pos| self.cells.get(&pos).map(|cell| (pos, cell)))
    }

    pub fn count_explosive_siblings(&self, coords: Coord3, projection: Projection) -> u8 {
        self.siblings(coords, projection)
            .filter(|(_, cell)| cell.is_explosive())
            .count() as u8
    }

    pub fn rock_siblings(&self, coords: Coord3, projection: Projection) -> SmallVec<[Coord3; 8]> {
        self.siblings(coords, projection)
            .filter(|(_, cell)| cell.is_rock())
            .map(|(pos, _)| pos)
            .collect()
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.values().filter(|&cell| predicate(cell)).count() as CellCount
    }

    pub fn explosive_count(&self) -> CellCount {
        self.count_where(Cell::is_explosive)
    }

    pub fn rock_count(&self) -> CellCount {
        self.count_where(Cell::is_rock)
    }

    pub fn empty_count(&self) -> CellCount {
        self.count_where(Cell::is_empty)
    }

    pub fn marked_count(&self) -> CellCount {
        self.count_where(Cell::is_marked)
    }

    pub fn explosives_in_layer(&self, layer: Coord) -> CellCount {
        self.iter()
            .filter(|(coords, cell)| coords.z == layer && cell.is_explosive())
            .count() as CellCount
    }
}
