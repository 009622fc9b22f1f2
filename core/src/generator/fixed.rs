use alloc::vec::Vec;

use super::*;

/// Places explosives at explicit coordinates, for replays and hand-built fields.
///
/// The layout has to respect the same per-layer quota as a generated field.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedFieldGenerator {
    explosives: Vec<Coord3>,
}

impl FixedFieldGenerator {
    pub fn new(explosives: impl IntoIterator<Item = Coord3>) -> Self {
        Self {
            explosives: explosives.into_iter().collect(),
        }
    }
}

impl FieldGenerator for FixedFieldGenerator {
    fn generate(self, config: FieldConfig, start: Coord3) -> Result<Grid, GenerationError> {
        check_feasible(&config, start)?;

        let extent = config.extent();
        let mut explosives = HashSet::with_capacity(self.explosives.len());
        for coords in self.explosives {
            if !extent.contains(coords) || coords == start || !explosives.insert(coords) {
                return Err(GenerationError::InvalidExplosive(coords));
            }
        }

        for layer in extent.layers() {
            let expected = config.per_layer_quota(layer);
            let actual = explosives.iter().filter(|coords| coords.z == layer).count() as CellCount;
            if actual != expected {
                return Err(GenerationError::InvalidLayout {
                    layer,
                    expected,
                    actual,
                });
            }
        }

        log::debug!("Assembling fixed layout {:?} from {}", config, start);
        Ok(assemble(extent, &explosives))
    }
}
