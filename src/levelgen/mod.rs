//! Deterministic level generation
//!
//! Generation is engine-free and runs to completion once per level:
//! - Seeded RNG only (one stream per build, consumed in a fixed order)
//! - Left-to-right segment walk with lookback countdowns
//! - No rendering or platform dependencies
//!
//! Draw order for one build:
//! 1. sequencer: per piece a hole roll, then structure draws on eligible ground
//! 2. scenery (overworld only): clouds, mountains, bushes, fences
//! 3. enemy spawns
//! 4. fixtures (no draws)

pub mod context;
pub mod coords;
pub mod level;
pub mod rng;
pub mod scenery;
pub mod sequencer;
pub mod structures;

pub use context::GenerationContext;
pub use level::{
    EnemySpawn, FallGuard, Fixture, FixtureKind, GuardSide, Hole, Level, Mount,
    PlacementDecision, SceneryCategory, SceneryItem, StructureKind, StructureSpec,
};
pub use rng::{LevelRng, Mulberry32};
pub use scenery::{scatter_category, scatter_scenery, spawn_enemies};
pub use sequencer::{Sequence, SequencerState, place_fixtures, sequence_level};
pub use structures::place_structure;

use crate::config::{ConfigError, LevelVariant, WorldConfig};
use crate::consts::OVERWORLD_CHANCE;

/// Roll the level style the way the game does before loading assets
pub fn roll_variant(rng: &mut LevelRng) -> LevelVariant {
    if rng.random_int(0, 100) <= OVERWORLD_CHANCE {
        LevelVariant::Overworld
    } else {
        LevelVariant::Underground
    }
}

/// Build a complete level.
///
/// Fails only if `config` does not validate.
pub fn generate_level(config: &WorldConfig, rng: LevelRng) -> Result<Level, ConfigError> {
    let mut ctx = GenerationContext::new(config.clone(), rng)?;
    let seed = ctx.rng.seed();

    let Sequence {
        decisions,
        fall_guards,
    } = sequence_level(&mut ctx);

    let scenery = if ctx.config.variant.is_overworld() {
        scatter_scenery(&mut ctx)
    } else {
        Vec::new()
    };
    let enemies = spawn_enemies(&mut ctx);
    let fixtures = place_fixtures(&ctx.config);

    let level = Level {
        seed,
        variant: ctx.config.variant,
        world_width: ctx.config.world_width,
        decisions,
        holes: ctx.holes,
        fall_guards,
        fixtures,
        scenery,
        enemies,
    };

    log::info!(
        "Level ({}): {} pieces, {} holes, {} structures, {} scenery, {} enemies, seed {:?}",
        level.variant.as_str(),
        level.decisions.len(),
        level.holes.len(),
        level.structures().count(),
        level.scenery.len(),
        level.enemies.len(),
        level.seed
    );

    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_config() -> WorldConfig {
        // 1000px viewport: 11000px world, 100 segments
        WorldConfig::for_viewport(1000.0, 1100.0, LevelVariant::Overworld)
    }

    #[test]
    fn test_seed_42_end_to_end() {
        let config = reference_config();
        assert_eq!(config.world_width, 11.0 * 1000.0);
        assert_eq!(config.segment_count, 100);

        let a = generate_level(&config, LevelRng::seeded(42)).unwrap();
        let b = generate_level(&config, LevelRng::seeded(42)).unwrap();

        let trigger = a.fixture(FixtureKind::StartTrigger).unwrap();
        assert_eq!(trigger.pos.x, 1000.0);
        assert_eq!(a.holes.len(), b.holes.len());
        assert_eq!(a, b);
        assert_eq!(a.seed, Some(42));
    }

    #[test]
    fn test_underground_has_no_scenery_but_exit() {
        let config = reference_config().with_variant(LevelVariant::Underground);
        let level = generate_level(&config, LevelRng::seeded(8)).unwrap();
        assert!(level.scenery.is_empty());
        assert!(level.fixture(FixtureKind::ExitTrigger).is_some());
        assert!(level.fixture(FixtureKind::Ceiling).is_some());
        assert_eq!(level.variant, LevelVariant::Underground);
    }

    #[test]
    fn test_overworld_scatters_every_category() {
        let level = generate_level(&reference_config(), LevelRng::seeded(77)).unwrap();
        for category in SceneryCategory::ALL {
            assert!(level.scenery_count(category) > 0, "no {}", category.name());
        }
        assert!(level.fixture(FixtureKind::ExitTrigger).is_none());
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut config = reference_config();
        config.world_width = 0.0;
        assert!(generate_level(&config, LevelRng::seeded(1)).is_err());
    }

    #[test]
    fn test_roll_variant_mostly_overworld() {
        let mut rng = LevelRng::seeded(5);
        let over = (0..1000)
            .filter(|_| roll_variant(&mut rng).is_overworld())
            .count();
        // 85 of 101 outcomes
        assert!((780..=900).contains(&over), "over = {}", over);
    }

    #[test]
    fn test_level_json_round_trip() {
        let level = generate_level(&reference_config(), LevelRng::seeded(3)).unwrap();
        let json = level.to_json().unwrap();
        let parsed: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.holes, level.holes);
        assert_eq!(parsed.decisions.len(), level.decisions.len());
    }

    proptest! {
        #[test]
        fn prop_same_seed_same_level(seed in any::<u32>()) {
            let config = reference_config();
            let a = generate_level(&config, LevelRng::seeded(seed)).unwrap();
            let b = generate_level(&config, LevelRng::seeded(seed)).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_nothing_in_reserve_zones(seed in any::<u32>()) {
            let config = reference_config();
            let level = generate_level(&config, LevelRng::seeded(seed)).unwrap();
            let start = config.start_reserve;
            let end = config.end_reserve_start();
            for hole in &level.holes {
                prop_assert!(hole.start > start && hole.end < end);
            }
            for spec in level.structures() {
                let right = spec.anchor_x + spec.occupied_segments as f32 * config.piece_stride();
                prop_assert!(spec.anchor_x > start && right < end);
            }
        }

        #[test]
        fn prop_enemies_on_solid_ground(seed in any::<u32>()) {
            let config = reference_config();
            let level = generate_level(&config, LevelRng::seeded(seed)).unwrap();
            let approach = config.segment_width * crate::consts::HOLE_APPROACH_MARGIN;
            for enemy in &level.enemies {
                prop_assert!(level.holes.iter().all(|h| !h.blocks(enemy.pos.x, approach)));
            }
        }
    }
}
