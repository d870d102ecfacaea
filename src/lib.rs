//! Brickrun - procedural levels for a browser side-scroller
//!
//! Core modules:
//! - `levelgen`: Deterministic level generation (segments, holes, structures, scenery)
//! - `config`: World dimensions, densities and tuning
//! - `builder`: Hand-off of a generated level to the rendering/physics engine
//! - `platform`: Browser/native platform abstraction (seed input)
//!
//! Rendering, audio, input and physics resolution belong to the JS engine
//! that consumes the generated [`levelgen::Level`].

pub mod builder;
pub mod config;
pub mod levelgen;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use builder::{ProfileBuilder, WorldBuilder};
pub use config::{ConfigError, DensityRange, LevelVariant, SceneryDensities, WorldConfig};
pub use levelgen::{GenerationContext, Level, LevelRng, generate_level, roll_variant};

/// World generation constants
pub mod consts {
    /// World width in viewports
    pub const WORLD_VIEWPORTS: f32 = 11.0;
    /// Number of ground pieces the world is divided into
    pub const SEGMENT_COUNT: u32 = 100;
    /// Largest segment count a config may ask for
    pub const MAX_SEGMENT_COUNT: u32 = 10_000;
    /// Largest per-category scatter count a density may imply
    pub const MAX_SCATTER_COUNT: i32 = 4096;
    /// Ground sits in the bottom fifth of the viewport
    pub const PLATFORM_HEIGHT_RATIO: f32 = 5.0;

    /// Ground tiles are drawn at 2x, so one piece covers two segment widths
    pub const GROUND_TILE_SCALE: f32 = 2.0;

    /// Spawn-safe zone at the start of the level (viewports)
    pub const START_RESERVE_VIEWPORTS: f32 = 2.0;
    /// No holes near the final flag (viewports)
    pub const END_RESERVE_VIEWPORTS: f32 = 2.0;
    /// Underground levels keep extra room for the exit pipe (viewports)
    pub const EXIT_RESERVE_VIEWPORTS: f32 = 2.5;

    /// Chance (0-100) that an eligible segment becomes a hole
    pub const HOLE_CHANCE: u8 = 10;
    /// Ground segments required after a hole before the next one
    pub const HOLE_COOLDOWN: i32 = 2;
    /// Ground segments between the level start and the first structure
    pub const STRUCTURE_LEAD_SEGMENTS: f32 = 2.0;

    /// Chance (0-100) that a level is overworld rather than underground
    pub const OVERWORLD_CHANCE: i32 = 84;

    /// Holes reject ground-bound samples this far (in segments) before their start
    pub const HOLE_APPROACH_MARGIN: f32 = 1.5;
    /// Re-draws before the coordinate sampler falls back to a scan
    pub const MAX_COORDINATE_ATTEMPTS: u32 = 64;

    /// Source sprites are 16px; blocks are scaled by viewport height / 345
    pub const BLOCK_SIZE_RATIO: f32 = 16.0 / 345.0;
    /// Floating structures hover this many platform heights above the ground line
    pub const FLOAT_HEIGHT_PLATFORMS: f32 = 0.9;
}
