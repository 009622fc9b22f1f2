use super::*;

/// Places each layer's explosives at uniformly random cells, falling back to a deterministic scan once the attempt
/// budget runs out. The start cell never holds an explosive.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomFieldGenerator {
    seed: u64,
    attempts_per_explosive: Option<CellCount>,
}

impl RandomFieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            attempts_per_explosive: None,
        }
    }

    /// Overrides the sampling budget, which defaults to one layer's area per explosive.
    pub fn with_attempts_per_explosive(self, attempts: CellCount) -> Self {
        Self {
            attempts_per_explosive: Some(attempts),
            ..self
        }
    }
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: FieldConfig, start: Coord3) -> Result<Grid, GenerationError> {
        use rand::prelude::*;

        check_feasible(&config, start)?;

        let extent = config.extent();
        let span = extent.span();
        let attempts_per_explosive = self.attempts_per_explosive.unwrap_or(extent.area());
        let mut explosives: HashSet<Coord3> = HashSet::with_capacity(config.explosive_count as usize);
        let mut rng = SmallRng::seed_from_u64(self.seed);

        log::debug!(
            "Generating {:?} from {} with seed {}",
            config,
            start,
            self.seed
        );

        for layer in extent.layers() {
            let quota = config.per_layer_quota(layer);
            let budget = quota.saturating_mul(attempts_per_explosive);
            let mut placed = 0;
            let mut attempts = 0;

            while placed < quota && attempts < budget {
                attempts += 1;
                let candidate = Coord3::new(
                    rng.random_range(span.clone()),
                    rng.random_range(span.clone()),
                    layer,
                );
                if candidate != start && explosives.insert(candidate) {
                    placed += 1;
                }
            }

            if placed < quota {
                log::warn!(
                    "Random placement gave up after {} attempts on layer {}, scanning for {} more explosives",
                    attempts,
                    layer,
                    quota - placed
                );
                for coords in extent.iter_layer(layer) {
                    if placed == quota {
                        break;
                    }
                    if coords != start && explosives.insert(coords) {
                        placed += 1;
                    }
                }
            }

            if placed < quota {
                return Err(GenerationError::NotEnoughCells {
                    layer,
                    requested: quota,
                    available: placed,
                });
            }
            log::trace!("Layer {} holds {} explosives", layer, placed);
        }

        Ok(assemble(extent, &explosives))
    }
}
