//! Scenery and enemy scattering
//!
//! Instance counts come from the inverted density mapping: a category's count
//! is drawn between `world_width / min` and `world_width / max`, so larger
//! divisors mean sparser props.

use glam::Vec2;

use super::context::GenerationContext;
use super::level::{EnemySpawn, SceneryCategory, SceneryItem};
use crate::config::DensityRange;

/// Tiled fence width range
const FENCE_WIDTH: (i32, i32) = (100, 250);

impl GenerationContext {
    fn density(&self, category: SceneryCategory) -> DensityRange {
        let d = &self.config.densities;
        match category {
            SceneryCategory::Cloud => d.cloud,
            SceneryCategory::Mountain => d.mountain,
            SceneryCategory::Bush => d.bush,
            SceneryCategory::Fence => d.fence,
        }
    }

    /// Draw an instance count for a density range
    pub fn scatter_count(&mut self, density: DensityRange) -> usize {
        let (lo, hi) = density.count_bounds(self.config.world_width);
        self.rng.random_int(lo, hi).max(0) as usize
    }
}

/// Scatter one category; returns the number of items appended to `out`.
///
/// Per item the draws are: X, then Y (clouds only), then the sprite variant
/// coin flip, or the tiled width for fences.
pub fn scatter_category(
    ctx: &mut GenerationContext,
    category: SceneryCategory,
    out: &mut Vec<SceneryItem>,
) -> usize {
    let density = ctx.density(category);
    let count = ctx.scatter_count(density);
    let ground = ctx.config.ground_line();
    let height = ctx.config.viewport_height;

    for _ in 0..count {
        let x = ctx.sample_coordinate(false, category.needs_ground());

        let item = match category {
            SceneryCategory::Cloud => {
                let y = ctx.rng.random_between(height / 80.0, height / 2.2);
                SceneryItem {
                    category,
                    pos: Vec2::new(x, y),
                    variant: u8::from(!ctx.rng.coin_flip()),
                    width: None,
                }
            }
            SceneryCategory::Mountain | SceneryCategory::Bush => SceneryItem {
                category,
                pos: Vec2::new(x, ground),
                variant: u8::from(!ctx.rng.coin_flip()),
                width: None,
            },
            SceneryCategory::Fence => SceneryItem {
                category,
                pos: Vec2::new(x, ground),
                variant: 0,
                width: Some(ctx.rng.random_int(FENCE_WIDTH.0, FENCE_WIDTH.1) as f32),
            },
        };
        out.push(item);
    }

    log::debug!("Scattered {} {}s", count, category.name());
    count
}

/// Scatter every category in [`SceneryCategory::ALL`] order
pub fn scatter_scenery(ctx: &mut GenerationContext) -> Vec<SceneryItem> {
    let mut items = Vec::new();
    for category in SceneryCategory::ALL {
        scatter_category(ctx, category, &mut items);
    }
    items
}

/// Enemy spawn points: entity range, clear of holes, on the ground line
pub fn spawn_enemies(ctx: &mut GenerationContext) -> Vec<EnemySpawn> {
    let count = ctx.scatter_count(ctx.config.densities.enemy);
    let ground = ctx.config.ground_line();
    (0..count)
        .map(|_| EnemySpawn {
            pos: Vec2::new(ctx.sample_coordinate(true, true), ground),
        })
        .collect()
}
