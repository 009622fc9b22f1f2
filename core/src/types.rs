use core::fmt;
use core::ops::{Neg, Range};
use serde::{Deserialize, Serialize};

/// Single coordinate component, `x`/`y` are centred on the origin and `z` is the layer index.
pub type Coord = i32;

/// Linear dimension, used for field size and layer count.
pub type Dim = u16;

/// Count type used for explosive counts and total-cell counts.
pub type CellCount = u32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Integer triple identifying a grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord3 {
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
}

impl Coord3 {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: Coord, y: Coord, z: Coord) -> Self {
        Self { x, y, z }
    }

    pub const fn get(self, axis: Axis) -> Coord {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub const fn with(self, axis: Axis, value: Coord) -> Self {
        let Self { x, y, z } = self;
        match axis {
            Axis::X => Self::new(value, y, z),
            Axis::Y => Self::new(x, value, z),
            Axis::Z => Self::new(x, y, value),
        }
    }

    /// Moves `amount` steps along `dir`, or `None` if the result does not fit in a [`Coord`].
    pub fn step(self, dir: AxisDir, amount: Coord) -> Option<Self> {
        let axis = dir.axis();
        let value = dir
            .sign()
            .checked_mul(amount)
            .and_then(|delta| self.get(axis).checked_add(delta))?;
        Some(self.with(axis, value))
    }
}

impl From<(Coord, Coord, Coord)> for Coord3 {
    fn from((x, y, z): (Coord, Coord, Coord)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coord3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Signed unit vector along one of the three axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisDir {
    axis: Axis,
    positive: bool,
}

impl AxisDir {
    pub const POS_X: Self = Self::new(Axis::X, true);
    pub const NEG_X: Self = Self::new(Axis::X, false);
    pub const POS_Y: Self = Self::new(Axis::Y, true);
    pub const NEG_Y: Self = Self::new(Axis::Y, false);
    pub const POS_Z: Self = Self::new(Axis::Z, true);
    pub const NEG_Z: Self = Self::new(Axis::Z, false);

    pub const fn new(axis: Axis, positive: bool) -> Self {
        Self { axis, positive }
    }

    pub const fn axis(self) -> Axis {
        self.axis
    }

    pub const fn is_positive(self) -> bool {
        self.positive
    }

    pub const fn sign(self) -> Coord {
        if self.positive { 1 } else { -1 }
    }

    pub const fn negate(self) -> Self {
        Self::new(self.axis, !self.positive)
    }
}

impl Neg for AxisDir {
    type Output = AxisDir;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

/// Square layers of `size` x `size` cells stacked `layers` deep.
///
/// Along `x` and `y` a layer spans `[-size / 2, (size + 1) / 2)`, so odd sizes are centred exactly on the origin and
/// even sizes lean one cell towards the negative side. Layers are `0..layers` along `z`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    size: Dim,
    layers: Dim,
}

impl Extent {
    pub const fn new(size: Dim, layers: Dim) -> Self {
        Self { size, layers }
    }

    pub const fn size(&self) -> Dim {
        self.size
    }

    pub const fn layer_count(&self) -> Dim {
        self.layers
    }

    /// Range covered along `x` and `y`.
    pub const fn span(&self) -> Range<Coord> {
        let size = self.size as Coord;
        -(size / 2)..(size + 1) / 2
    }

    /// Range covered along `z`.
    pub const fn layers(&self) -> Range<Coord> {
        0..self.layers as Coord
    }

    pub const fn area(&self) -> CellCount {
        let size = self.size as CellCount;
        size.saturating_mul(size)
    }

    pub const fn total_cells(&self) -> CellCount {
        self.area().saturating_mul(self.layers as CellCount)
    }

    pub fn contains(&self, coords: Coord3) -> bool {
        let span = self.span();
        span.contains(&coords.x) && span.contains(&coords.y) && self.layers().contains(&coords.z)
    }

    /// Every coordinate of `layer`, rows from the top (largest `y`) down, each row left to right.
    pub fn iter_layer(&self, layer: Coord) -> impl Iterator<Item = Coord3> + use<> {
        let span = self.span();
        let row = span.clone();
        span.rev()
            .flat_map(move |y| row.clone().map(move |x| Coord3::new(x, y, layer)))
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord3> + use<> {
        let extent = *self;
        self.layers().flat_map(move |layer| extent.iter_layer(layer))
    }
}

/// Offsets within the visible plane, `(a, b)` along the two visible axes.
const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The in-plane siblings of a coordinate, depth held fixed. Only checked against the coordinate range, not a field.
#[derive(Debug)]
pub struct SiblingIter {
    center: Coord3,
    axes: (Axis, Axis),
    index: u8,
}

impl SiblingIter {
    pub(crate) fn new(center: Coord3, axes: (Axis, Axis)) -> Self {
        Self {
            center,
            axes,
            index: 0,
        }
    }
}

impl Iterator for SiblingIter {
    type Item = Coord3;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &(da, db) = DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            let (a, b) = self.axes;
            let center = self.center;
            // siblings past the edge of the coordinate range do not exist
            let (Some(next_a), Some(next_b)) =
                (center.get(a).checked_add(da), center.get(b).checked_add(db))
            else {
                continue;
            };
            return Some(center.with(a, next_a).with(b, next_b));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = DISPLACEMENTS.len() - usize::from(self.index);
        (0, Some(left))
    }
}
