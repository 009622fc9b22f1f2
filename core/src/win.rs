use serde::{Deserialize, Serialize};

use crate::*;

/// Which win condition a field satisfies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinCondition {
    /// No rock is left anywhere.
    Cleared,
    /// Every explosive carries a mark.
    AllMarked,
}

/// Checks the grid for a win. A field without explosives can only be won by clearing it.
pub fn check_win(grid: &Grid) -> Option<WinCondition> {
    let mut rocks = 0;
    let mut explosives = 0;
    let mut marked_explosives = 0;

    for (_, cell) in grid.iter() {
        match cell.kind() {
            CellKind::Rock => rocks += 1,
            CellKind::Explosive => {
                explosives += 1;
                if cell.is_marked() {
                    marked_explosives += 1;
                }
            }
            CellKind::Empty(_) => {}
        }
    }

    if rocks == 0 {
        Some(WinCondition::Cleared)
    } else if explosives > 0 && marked_explosives == explosives {
        Some(WinCondition::AllMarked)
    } else {
        None
    }
}
