use serde::{Deserialize, Serialize};

use crate::*;

/// Which way the view tips when rotating the frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Top => Bottom,
            Bottom => Top,
            Left => Right,
            Right => Left,
        }
    }
}

/// Viewing frame made of three mutually orthogonal unit vectors.
///
/// `forward` is the hidden depth axis, `up` and `right` span the visible plane. Every transition is a 90° turn, so the
/// frame stays orthonormal and keeps its handedness.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Projection {
    forward: AxisDir,
    up: AxisDir,
    right: AxisDir,
}

impl Projection {
    pub const IDENTITY: Self = Self {
        forward: AxisDir::POS_Z,
        up: AxisDir::POS_Y,
        right: AxisDir::POS_X,
    };

    pub const fn forward(self) -> AxisDir {
        self.forward
    }

    pub const fn up(self) -> AxisDir {
        self.up
    }

    pub const fn right(self) -> AxisDir {
        self.right
    }

    /// Frame reached by turning towards `direction`.
    #[must_use]
    pub const fn apply(self, direction: Direction) -> Self {
        let Self { forward, up, right } = self;
        match direction {
            Direction::Top => Self {
                forward: up.negate(),
                up: forward,
                right,
            },
            Direction::Bottom => Self {
                forward: up,
                up: forward.negate(),
                right,
            },
            Direction::Right => Self {
                forward: right.negate(),
                up,
                right: forward,
            },
            Direction::Left => Self {
                forward: right,
                up,
                right: forward.negate(),
            },
        }
    }

    pub fn rotate(&mut self, direction: Direction) {
        *self = self.apply(direction);
    }

    /// The two axes spanned by `right` and `up`, in that order.
    pub const fn visible_plane_axes(self) -> (Axis, Axis) {
        (self.right.axis(), self.up.axis())
    }

    pub const fn depth_axis(self) -> Axis {
        self.forward.axis()
    }

    pub fn siblings(self, center: Coord3) -> SiblingIter {
        SiblingIter::new(center, self.visible_plane_axes())
    }

    /// Whether both coordinates lie in the same visible slice.
    pub const fn shares_slice(self, a: Coord3, b: Coord3) -> bool {
        let depth = self.depth_axis();
        a.get(depth) == b.get(depth)
    }

    /// Maps a 2-D delta in the visible plane (`dx` along `right`, `dy` along `up`) onto the grid.
    ///
    /// Returns `None` when the target does not fit in the coordinate range.
    pub fn project_delta(self, from: Coord3, (dx, dy): (Coord, Coord)) -> Option<Coord3> {
        from.step(self.right, dx)?.step(self.up, dy)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::IDENTITY
    }
}
