//! World configuration for one level build
//!
//! Set once before generation and never mutated afterward. The last config
//! used in the browser is persisted in LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Level style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelVariant {
    #[default]
    Overworld,
    /// Closed level with a ceiling and an exit pipe before the flag
    Underground,
}

impl LevelVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelVariant::Overworld => "overworld",
            LevelVariant::Underground => "underground",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overworld" | "over" => Some(LevelVariant::Overworld),
            "underground" | "under" => Some(LevelVariant::Underground),
            _ => None,
        }
    }

    pub fn is_overworld(&self) -> bool {
        *self == LevelVariant::Overworld
    }

    /// Width of the no-hole zone before the end of the world (viewports)
    pub fn end_reserve_viewports(&self) -> f32 {
        match self {
            LevelVariant::Overworld => END_RESERVE_VIEWPORTS,
            LevelVariant::Underground => EXIT_RESERVE_VIEWPORTS,
        }
    }
}

/// Spacing divisors for one scatter category.
///
/// The instance count is drawn between `world_width / min` and
/// `world_width / max`, so `min` is the *larger* spacing and yields fewer
/// instances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityRange {
    pub min: f32,
    pub max: f32,
}

impl DensityRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Inclusive instance-count bounds for a world of the given width
    pub fn count_bounds(&self, world_width: f32) -> (i32, i32) {
        let sparse = (world_width / self.min).trunc() as i32;
        let dense = (world_width / self.max).trunc() as i32;
        (sparse.min(dense), sparse.max(dense))
    }
}

/// Per-category scatter densities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneryDensities {
    pub cloud: DensityRange,
    pub mountain: DensityRange,
    pub bush: DensityRange,
    pub fence: DensityRange,
    #[serde(default = "default_enemy_density")]
    pub enemy: DensityRange,
}

fn default_enemy_density() -> DensityRange {
    DensityRange::new(2200.0, 1400.0)
}

impl Default for SceneryDensities {
    fn default() -> Self {
        Self {
            cloud: DensityRange::new(760.0, 380.0),
            mountain: DensityRange::new(6400.0, 3800.0),
            bush: DensityRange::new(960.0, 760.0),
            fence: DensityRange::new(4000.0, 2000.0),
            enemy: default_enemy_density(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A world dimension is zero, negative or not finite.
    #[error("invalid dimension {name}: {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    /// The world has no ground pieces.
    #[error("segment count must be at least 1")]
    NoSegments,

    /// More ground pieces than the sequencer will walk.
    #[error("segment count {count} exceeds {max}")]
    TooManySegments { count: u32, max: u32 },

    /// The world is not wider than one viewport.
    #[error("world width {world} must exceed viewport width {viewport}")]
    WorldTooNarrow { world: f32, viewport: f32 },

    /// Start and end reserves leave nothing in between.
    #[error("reserve zones ({start} + {end}) cover the whole world ({world})")]
    ReservesOverlap { start: f32, end: f32, world: f32 },

    /// Hole chance outside 0-100.
    #[error("hole chance {0} is not a percentage")]
    InvalidHoleChance(u8),

    /// A density divisor is zero, negative or not finite.
    #[error("invalid {category} density: min {min}, max {max}")]
    InvalidDensity {
        category: &'static str,
        min: f32,
        max: f32,
    },

    /// A density divisor so small the category would scatter too many items.
    #[error("{category} density allows {count} items, more than {max}")]
    DensityTooFine {
        category: &'static str,
        count: i32,
        max: i32,
    },

    /// Config JSON could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Immutable parameters for one level build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Total world width in pixels
    pub world_width: f32,
    /// Viewport (screen) width
    pub viewport_width: f32,
    /// Viewport (screen) height
    pub viewport_height: f32,
    /// Height of the ground strip
    pub platform_height: f32,
    /// Number of ground pieces; the sequencer runs `segment_count + 1` times
    pub segment_count: u32,
    /// Width of one segment; a ground piece covers two of them
    pub segment_width: f32,
    /// No holes or structures below this X
    pub start_reserve: f32,
    /// No holes or structures within this distance of the world end
    pub end_reserve: f32,
    /// Chance (0-100) that an eligible segment becomes a hole
    pub hole_chance: u8,
    /// Scenery and enemy scatter densities
    #[serde(default)]
    pub densities: SceneryDensities,
    pub variant: LevelVariant,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::for_viewport(1920.0, 1080.0 * 1.1, LevelVariant::Overworld)
    }
}

impl WorldConfig {
    /// Derive the reference proportions from a viewport size
    pub fn for_viewport(width: f32, height: f32, variant: LevelVariant) -> Self {
        let world_width = width * WORLD_VIEWPORTS;
        Self {
            world_width,
            viewport_width: width,
            viewport_height: height,
            platform_height: height / PLATFORM_HEIGHT_RATIO,
            segment_count: SEGMENT_COUNT,
            segment_width: (world_width - width) / SEGMENT_COUNT as f32,
            start_reserve: width * START_RESERVE_VIEWPORTS,
            end_reserve: width * variant.end_reserve_viewports(),
            hole_chance: HOLE_CHANCE,
            densities: SceneryDensities::default(),
            variant,
        }
    }

    /// Same proportions with a different variant (end reserve follows the variant)
    pub fn with_variant(mut self, variant: LevelVariant) -> Self {
        self.end_reserve = self.viewport_width * variant.end_reserve_viewports();
        self.variant = variant;
        self
    }

    /// Distance the sequencer cursor advances per iteration
    pub fn piece_stride(&self) -> f32 {
        self.segment_width * GROUND_TILE_SCALE
    }

    /// Y of the top of the ground strip (scenery and entities stand here)
    pub fn ground_line(&self) -> f32 {
        self.viewport_height - self.platform_height
    }

    /// Edge size of one block sprite
    pub fn block_size(&self) -> f32 {
        self.viewport_height * BLOCK_SIZE_RATIO
    }

    /// Left edge of the end reserve zone
    pub fn end_reserve_start(&self) -> f32 {
        self.world_width - self.end_reserve
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("world_width", self.world_width),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("platform_height", self.platform_height),
            ("segment_width", self.segment_width),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        for (name, value) in [("start_reserve", self.start_reserve), ("end_reserve", self.end_reserve)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }

        if self.segment_count == 0 {
            return Err(ConfigError::NoSegments);
        }
        if self.segment_count > MAX_SEGMENT_COUNT {
            return Err(ConfigError::TooManySegments {
                count: self.segment_count,
                max: MAX_SEGMENT_COUNT,
            });
        }
        if self.world_width <= self.viewport_width {
            return Err(ConfigError::WorldTooNarrow {
                world: self.world_width,
                viewport: self.viewport_width,
            });
        }
        if self.start_reserve + self.end_reserve >= self.world_width {
            return Err(ConfigError::ReservesOverlap {
                start: self.start_reserve,
                end: self.end_reserve,
                world: self.world_width,
            });
        }
        if self.hole_chance > 100 {
            return Err(ConfigError::InvalidHoleChance(self.hole_chance));
        }

        let d = &self.densities;
        let categories = [
            ("cloud", d.cloud),
            ("mountain", d.mountain),
            ("bush", d.bush),
            ("fence", d.fence),
            ("enemy", d.enemy),
        ];
        for (category, range) in categories {
            let ok = |v: f32| v.is_finite() && v > 0.0;
            if !ok(range.min) || !ok(range.max) {
                return Err(ConfigError::InvalidDensity {
                    category,
                    min: range.min,
                    max: range.max,
                });
            }
            let (_, count) = range.count_bounds(self.world_width);
            if count > MAX_SCATTER_COUNT {
                return Err(ConfigError::DensityTooFine {
                    category,
                    count,
                    max: MAX_SCATTER_COUNT,
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps or non-string keys
        serde_json::to_string(self).unwrap_or_default()
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "brickrun_world_config";

    /// Load the last used config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;

        let json = storage.get_item(Self::STORAGE_KEY).ok().flatten()?;
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded world config from LocalStorage");
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring stored world config: {}", e);
                None
            }
        }
    }

    /// Save this config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("World config saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Option<Self> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
