//! Level sequencer
//!
//! Walks the ground track one piece at a time, left to right, deciding per
//! piece between solid ground, a hole, or ground carrying a structure.
//! Two lookback countdowns keep holes and structures apart:
//! - after a hole, [`HOLE_COOLDOWN`] ground pieces before the next hole
//! - after a structure, its span in pieces before the next hole or structure
//!
//! Holes and structures never touch the start or end reserve zones.

use glam::Vec2;

use super::context::GenerationContext;
use super::level::{FallGuard, Fixture, FixtureKind, GuardSide, Hole, PlacementDecision};
use super::structures::place_structure;
use crate::config::WorldConfig;
use crate::consts::HOLE_COOLDOWN;

/// Cursor carried across sequencer iterations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerState {
    /// Left edge of the next piece
    pub piece_start: f32,
    /// Pieces that must still be ground before another hole
    pub last_was_hole: i32,
    /// Pieces still covered by (or cooling down after) the last structure
    pub last_was_structure: i32,
}

impl SequencerState {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            piece_start: config.viewport_width,
            last_was_hole: 0,
            last_was_structure: 0,
        }
    }

    pub fn cooled_down(&self) -> bool {
        self.last_was_hole <= 0 && self.last_was_structure <= 0
    }
}

/// Per-piece decisions plus the hole-edge guards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    pub decisions: Vec<PlacementDecision>,
    pub fall_guards: Vec<FallGuard>,
}

/// Run the sequencer for `segment_count + 1` pieces.
///
/// Holes are appended to `ctx.holes` as they are placed. Each iteration
/// consumes one hole roll; structure-eligible ground pieces then consume the
/// placement policy's draws.
pub fn sequence_level(ctx: &mut GenerationContext) -> Sequence {
    let stride = ctx.config.piece_stride();
    let ground_line = ctx.config.ground_line();
    let hole_chance = i32::from(ctx.config.hole_chance);

    let mut state = SequencerState::new(&ctx.config);
    let mut out = Sequence {
        decisions: Vec::with_capacity(ctx.config.segment_count as usize + 1),
        fall_guards: Vec::new(),
    };

    for _ in 0..=ctx.config.segment_count {
        let x = state.piece_start;
        let roll = ctx.rng.random_int(0, 100);

        let emit_hole = roll <= hole_chance
            && state.cooled_down()
            && !ctx.span_touches_reserve(x, x + stride);

        if emit_hole {
            let hole = Hole { start: x, end: x + stride };
            ctx.holes.push(hole);
            state.last_was_hole = HOLE_COOLDOWN;

            out.fall_guards.push(FallGuard {
                pos: Vec2::new(hole.start, ground_line),
                side: GuardSide::Left,
            });
            out.fall_guards.push(FallGuard {
                pos: Vec2::new(hole.end, ground_line),
                side: GuardSide::Right,
            });
            log::debug!("Hole at [{}, {}]", hole.start, hole.end);
            out.decisions.push(PlacementDecision::Hole(hole));
        } else {
            state.last_was_hole = (state.last_was_hole - 1).max(0);

            let structure = if ctx.is_structure_anchor(x) && state.cooled_down() {
                place_structure(ctx, x)
            } else {
                None
            };

            match structure {
                Some(spec) => {
                    state.last_was_structure = spec.occupied_segments as i32;
                    out.decisions.push(PlacementDecision::GroundWithStructure {
                        x,
                        width: stride,
                        structure: spec,
                    });
                }
                None => {
                    state.last_was_structure = (state.last_was_structure - 1).max(0);
                    out.decisions.push(PlacementDecision::SolidGround { x, width: stride });
                }
            }
        }

        state.piece_start += stride;
    }

    out
}

/// Fixed objects outside the segment loop: start trigger, exit and ceiling
/// for underground levels, final flag and castle
pub fn place_fixtures(config: &WorldConfig) -> Vec<Fixture> {
    let ground = config.ground_line();
    let vw = config.viewport_width;
    let ww = config.world_width;
    let block = config.block_size();

    let mut fixtures = vec![
        Fixture {
            kind: FixtureKind::StartTrigger,
            pos: Vec2::new(vw, ground),
            width: block * 2.0,
        },
        Fixture {
            kind: FixtureKind::StartWall,
            pos: Vec2::new(vw, ground),
            width: 1.0,
        },
    ];

    if !config.variant.is_overworld() {
        fixtures.extend([
            Fixture {
                kind: FixtureKind::EntryColumn,
                pos: Vec2::new(vw, config.viewport_height - config.platform_height / 1.2),
                width: block,
            },
            Fixture {
                kind: FixtureKind::Ceiling,
                pos: Vec2::new(vw * 1.2, config.viewport_height / 13.0),
                width: ww / 2.68,
            },
            Fixture {
                kind: FixtureKind::ExitPipe,
                pos: Vec2::new(ww - vw, ground),
                width: block * 2.0,
            },
            Fixture {
                kind: FixtureKind::ExitWall,
                pos: Vec2::new(ww - vw, ground),
                width: 1.0,
            },
            Fixture {
                kind: FixtureKind::ExitTrigger,
                pos: Vec2::new(ww - vw * 1.03, ground),
                width: block * 2.5,
            },
        ]);
    }

    fixtures.push(Fixture {
        kind: FixtureKind::FinalFlag,
        pos: Vec2::new(ww - ww / 30.0, ground),
        width: 3.0,
    });
    fixtures.push(Fixture {
        kind: FixtureKind::Castle,
        pos: Vec2::new(ww - ww / 75.0, ground),
        width: 0.0,
    });

    fixtures
}
