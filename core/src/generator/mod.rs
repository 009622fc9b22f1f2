use hashbrown::HashSet;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

pub trait FieldGenerator {
    /// Builds a complete grid for `config` in which `start` holds rock.
    fn generate(self, config: FieldConfig, start: Coord3) -> Result<Grid, GenerationError>;
}

/// Cells of `layer` that may hold an explosive.
fn layer_capacity(extent: Extent, start: Coord3, layer: Coord) -> CellCount {
    if start.z == layer {
        extent.area().saturating_sub(1)
    } else {
        extent.area()
    }
}

/// Rejects configurations where the start is off the field or some layer cannot hold its quota.
fn check_feasible(config: &FieldConfig, start: Coord3) -> Result<(), GenerationError> {
    let extent = config.extent();
    if !extent.contains(start) {
        return Err(GenerationError::InvalidStart(start));
    }

    for layer in extent.layers() {
        let requested = config.per_layer_quota(layer);
        let available = layer_capacity(extent, start, layer);
        if requested > available {
            return Err(GenerationError::NotEnoughCells {
                layer,
                requested,
                available,
            });
        }
    }

    Ok(())
}

/// Fills every coordinate of `extent`, explosives where listed and rock everywhere else.
fn assemble(extent: Extent, explosives: &HashSet<Coord3>) -> Grid {
    let mut grid = Grid::with_extent(extent);
    for coords in extent.iter() {
        let cell = if explosives.contains(&coords) {
            Cell::explosive()
        } else {
            Cell::rock()
        };
        grid.insert(coords, cell);
    }
    grid
}
