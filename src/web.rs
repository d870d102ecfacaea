//! Browser bindings
//!
//! The JS engine calls [`generate_level_json`] once per level and builds
//! sprites and physics bodies from the returned JSON.

use wasm_bindgen::prelude::*;

use crate::config::WorldConfig;
use crate::levelgen::{LevelRng, generate_level, roll_variant};
use crate::platform;

/// Generate a level for the current viewport.
///
/// `?seed=<int>` in the page URL makes the level reproducible. An explicit
/// `config_json` overrides the derived proportions and is remembered in
/// LocalStorage; otherwise the variant is rolled from the level RNG.
#[wasm_bindgen]
pub fn generate_level_json(
    viewport_width: f32,
    viewport_height: f32,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let mut rng = LevelRng::from_seed_input(platform::seed_input());

    let config = match config_json {
        Some(json) => {
            let config = WorldConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
            config.save();
            config
        }
        None => {
            let variant = roll_variant(&mut rng);
            WorldConfig::for_viewport(viewport_width, viewport_height, variant)
        }
    };

    let level = generate_level(&config, rng).map_err(|e| JsValue::from_str(&e.to_string()))?;
    level.to_json().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Last config passed to [`generate_level_json`], if any
#[wasm_bindgen]
pub fn stored_config_json() -> Option<String> {
    WorldConfig::load().map(|config| config.to_json())
}
