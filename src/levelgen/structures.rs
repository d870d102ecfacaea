//! Structure placement policy
//!
//! Picks a structure archetype for an eligible ground piece with a weighted
//! draw, then draws its size. Archetypes whose span would reach the end
//! reserve are removed from the table before drawing.

use super::context::GenerationContext;
use super::level::{Mount, StructureKind, StructureSpec};
use crate::consts::FLOAT_HEIGHT_PLATFORMS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Archetype {
    BrickRun,
    MysteryBlock,
    MixedRun,
    Staircase,
    Pipe,
    CoinRow,
}

/// (archetype, weight, ground pieces spanned)
const ARCHETYPES: [(Archetype, i32, u32); 6] = [
    (Archetype::BrickRun, 30, 2),
    (Archetype::MysteryBlock, 25, 1),
    (Archetype::MixedRun, 15, 2),
    (Archetype::Staircase, 10, 2),
    (Archetype::Pipe, 12, 1),
    (Archetype::CoinRow, 8, 1),
];

impl Archetype {
    fn floats(self) -> bool {
        matches!(
            self,
            Archetype::BrickRun | Archetype::MysteryBlock | Archetype::MixedRun
        )
    }
}

/// Place a structure on the ground piece starting at `anchor_x`.
///
/// Returns `None` when no archetype fits before the end reserve; no RNG
/// draws are consumed in that case.
pub fn place_structure(ctx: &mut GenerationContext, anchor_x: f32) -> Option<StructureSpec> {
    let stride = ctx.config.piece_stride();
    let fitting: Vec<(Archetype, i32, u32)> = ARCHETYPES
        .iter()
        .copied()
        .filter(|&(_, _, span)| !ctx.span_touches_reserve(anchor_x, anchor_x + span as f32 * stride))
        .collect();

    let total: i32 = fitting.iter().map(|&(_, weight, _)| weight).sum();
    if total <= 0 {
        log::debug!("No structure fits at x={}", anchor_x);
        return None;
    }

    let mut roll = ctx.rng.random_int(1, total);
    let mut chosen = fitting[fitting.len() - 1];
    for &entry in &fitting {
        if roll <= entry.1 {
            chosen = entry;
            break;
        }
        roll -= entry.1;
    }
    let (archetype, _, span) = chosen;

    let kind = draw_kind(ctx, archetype);
    let mount = if archetype.floats() {
        Mount::Floating {
            height: ctx.config.platform_height * FLOAT_HEIGHT_PLATFORMS,
        }
    } else {
        Mount::Ground
    };

    log::debug!("Structure {} at x={} ({} pieces)", kind.name(), anchor_x, span);

    Some(StructureSpec {
        kind,
        anchor_x,
        occupied_segments: span,
        mount,
    })
}

fn draw_kind(ctx: &mut GenerationContext, archetype: Archetype) -> StructureKind {
    let rng = &mut ctx.rng;
    match archetype {
        Archetype::BrickRun => StructureKind::BrickRun {
            bricks: rng.random_int(3, 5) as u8,
        },
        Archetype::MysteryBlock => StructureKind::MysteryBlock,
        Archetype::MixedRun => {
            let bricks = rng.random_int(3, 5) as u8;
            let mystery_index = rng.random_int(0, bricks as i32 - 1) as u8;
            StructureKind::MixedRun { bricks, mystery_index }
        }
        Archetype::Staircase => StructureKind::Staircase {
            steps: rng.random_int(2, 4) as u8,
        },
        Archetype::Pipe => StructureKind::Pipe {
            height: rng.random_int(1, 3) as u8,
        },
        Archetype::CoinRow => StructureKind::CoinRow {
            coins: rng.random_int(3, 5) as u8,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LevelVariant, WorldConfig};
    use crate::levelgen::rng::LevelRng;
    use std::collections::HashSet;

    fn ctx(seed: u32) -> GenerationContext {
        let config = WorldConfig::for_viewport(1000.0, 1100.0, LevelVariant::Overworld);
        GenerationContext::new(config, LevelRng::seeded(seed)).unwrap()
    }

    #[test]
    fn test_spans_match_kinds() {
        let mut ctx = ctx(11);
        let mut names = HashSet::new();
        for _ in 0..2000 {
            let spec = place_structure(&mut ctx, 4000.0).unwrap();
            names.insert(spec.kind.name());
            let expected = match spec.kind {
                StructureKind::BrickRun { .. }
                | StructureKind::MixedRun { .. }
                | StructureKind::Staircase { .. } => 2,
                _ => 1,
            };
            assert_eq!(spec.occupied_segments, expected);
            assert!(spec.occupied_segments >= 1);
        }
        // Every archetype shows up
        assert_eq!(names.len(), ARCHETYPES.len());
    }

    #[test]
    fn test_sizes_in_range() {
        let mut ctx = ctx(12);
        for _ in 0..1000 {
            match place_structure(&mut ctx, 4000.0).unwrap().kind {
                StructureKind::BrickRun { bricks } => assert!((3..=5).contains(&bricks)),
                StructureKind::MixedRun { bricks, mystery_index } => {
                    assert!((3..=5).contains(&bricks));
                    assert!(mystery_index < bricks);
                }
                StructureKind::Staircase { steps } => assert!((2..=4).contains(&steps)),
                StructureKind::Pipe { height } => assert!((1..=3).contains(&height)),
                StructureKind::CoinRow { coins } => assert!((3..=5).contains(&coins)),
                StructureKind::MysteryBlock => {}
            }
        }
    }

    #[test]
    fn test_mounts() {
        let mut ctx = ctx(13);
        for _ in 0..500 {
            let spec = place_structure(&mut ctx, 4000.0).unwrap();
            match spec.kind {
                StructureKind::Staircase { .. }
                | StructureKind::Pipe { .. }
                | StructureKind::CoinRow { .. } => assert_eq!(spec.mount, Mount::Ground),
                _ => assert_eq!(spec.mount, Mount::Floating { height: 220.0 * 0.9 }),
            }
        }
    }

    #[test]
    fn test_only_single_piece_archetypes_near_end_reserve() {
        // End reserve starts at 9000; stride is 200
        let mut ctx = ctx(14);
        for _ in 0..500 {
            let spec = place_structure(&mut ctx, 8700.0).unwrap();
            assert_eq!(spec.occupied_segments, 1);
        }
    }

    #[test]
    fn test_nothing_fits_at_reserve_edge() {
        let mut ctx = ctx(15);
        let mut untouched = LevelRng::seeded(15);
        assert!(place_structure(&mut ctx, 8850.0).is_none());
        // No draws consumed
        assert_eq!(ctx.rng.random_int(0, 1000), untouched.random_int(0, 1000));
    }
}
