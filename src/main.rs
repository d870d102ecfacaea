//! Brickrun entry point
//!
//! On the web this only sets up logging; the page calls the exported
//! generator. Natively it generates one level and prints it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Brickrun level generator ready");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
use brickrun::LevelVariant;
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Generate one level and print its ground profile.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "brickrun", version, about)]
struct Args {
    /// Level seed, read like JavaScript `parseInt`. Falls back to BRICKRUN_SEED.
    #[arg(value_name = "SEED", allow_negative_numbers = true, value_parser = parse_seed_arg)]
    seed: Option<u32>,
    /// Print the level as JSON instead of the ASCII profile.
    #[arg(long)]
    json: bool,
    /// Force the level variant instead of rolling it.
    #[arg(long, value_name = "overworld|underground", value_parser = parse_variant_arg)]
    variant: Option<LevelVariant>,
    /// Viewport size the level is proportioned to.
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        default_value = "1920x1188",
        value_parser = parse_viewport_arg
    )]
    viewport: ViewportArg,
}

/// Viewport dimensions parsed from a WIDTHxHEIGHT argument.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, PartialEq)]
struct ViewportArg {
    width: f32,
    height: f32,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_seed_arg(raw: &str) -> Result<u32, String> {
    brickrun::platform::parse_seed(raw).ok_or_else(|| format!("expected an integer seed, got {:?}", raw))
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_variant_arg(raw: &str) -> Result<LevelVariant, String> {
    LevelVariant::from_str(raw).ok_or_else(|| format!("expected overworld or underground, got {:?}", raw))
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_viewport_arg(raw: &str) -> Result<ViewportArg, String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", raw))?;
    let width: f32 = w.trim().parse().map_err(|e| format!("invalid width {:?}: {}", w, e))?;
    let height: f32 = h.trim().parse().map_err(|e| format!("invalid height {:?}: {}", h, e))?;
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(format!("viewport must be positive, got {}x{}", width, height));
    }
    Ok(ViewportArg { width, height })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brickrun::platform;
    use brickrun::{LevelRng, ProfileBuilder, WorldConfig, generate_level, roll_variant};

    env_logger::init();

    let args = Args::parse();
    let seed = args.seed.or_else(platform::seed_input);

    let mut rng = LevelRng::from_seed_input(seed);
    let variant = args.variant.unwrap_or_else(|| roll_variant(&mut rng));
    let config = WorldConfig::for_viewport(args.viewport.width, args.viewport.height, variant);

    let level = match generate_level(&config, rng) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match level.to_json() {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut profile = ProfileBuilder::new();
    level.populate(&mut profile);
    println!("{} level, seed {:?}", level.variant.as_str(), level.seed);
    println!("{}", profile);
    println!(
        "holes: {}, structures: {}, scenery: {}, enemies: {}",
        level.holes.len(),
        level.structures().count(),
        level.scenery.len(),
        level.enemies.len()
    );
}
