//! Generated level data
//!
//! Everything the engine needs to instantiate a level. Built once per level
//! and read-only afterward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::LevelVariant;

/// A gap in the ground track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub start: f32,
    pub end: f32,
}

impl Hole {
    pub fn width(&self) -> f32 {
        self.end - self.start
    }

    /// True if `x` lies in `[start - approach, end]`
    pub fn blocks(&self, x: f32, approach: f32) -> bool {
        x >= self.start - approach && x <= self.end
    }
}

/// Where a structure is mounted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mount {
    /// Standing on the ground line
    Ground,
    /// Floating `height` pixels above the ground line
    Floating { height: f32 },
}

/// Structure archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureKind {
    /// Row of breakable bricks
    BrickRun { bricks: u8 },
    /// Single mystery block
    MysteryBlock,
    /// Brick row with one mystery block in it
    MixedRun { bricks: u8, mystery_index: u8 },
    /// Staircase of immovable blocks, tallest step on the right
    Staircase { steps: u8 },
    /// Immovable pipe, `height` blocks tall
    Pipe { height: u8 },
    /// Collectible coins resting on the ground
    CoinRow { coins: u8 },
}

impl StructureKind {
    pub fn name(&self) -> &'static str {
        match self {
            StructureKind::BrickRun { .. } => "brick-run",
            StructureKind::MysteryBlock => "mystery-block",
            StructureKind::MixedRun { .. } => "mixed-run",
            StructureKind::Staircase { .. } => "staircase",
            StructureKind::Pipe { .. } => "pipe",
            StructureKind::CoinRow { .. } => "coin-row",
        }
    }
}

/// One placed structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureSpec {
    pub kind: StructureKind,
    /// Left edge of the ground piece it sits on
    pub anchor_x: f32,
    /// Ground pieces covered, starting at the anchor piece
    pub occupied_segments: u32,
    pub mount: Mount,
}

/// Per-piece output of the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlacementDecision {
    SolidGround { x: f32, width: f32 },
    Hole(Hole),
    /// Ground piece with a structure anchored on it
    GroundWithStructure {
        x: f32,
        width: f32,
        structure: StructureSpec,
    },
}

impl PlacementDecision {
    /// Left edge of the piece
    pub fn x(&self) -> f32 {
        match self {
            PlacementDecision::SolidGround { x, .. } => *x,
            PlacementDecision::Hole(hole) => hole.start,
            PlacementDecision::GroundWithStructure { x, .. } => *x,
        }
    }

    pub fn is_hole(&self) -> bool {
        matches!(self, PlacementDecision::Hole(_))
    }

    pub fn structure(&self) -> Option<&StructureSpec> {
        match self {
            PlacementDecision::GroundWithStructure { structure, .. } => Some(structure),
            _ => None,
        }
    }
}

/// Which side of a hole a fall guard stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardSide {
    /// At `hole.start`, anchored by its right edge
    Left,
    /// At `hole.end`, anchored by its left edge
    Right,
}

/// Small invisible marker at a hole edge; keeps walkers from dropping in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallGuard {
    pub pos: Vec2,
    pub side: GuardSide,
}

/// Fixed level objects placed outside the segment loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixtureKind {
    /// Horizontal pipe the player enters to start the level
    StartTrigger,
    /// Invisible wall behind the start trigger
    StartWall,
    /// Block column closing the underground entrance
    EntryColumn,
    /// Underground ceiling strip
    Ceiling,
    /// Tall pipe before the exit
    ExitPipe,
    /// Invisible wall at the exit pipe
    ExitWall,
    /// Pipe that teleports the player to the level end
    ExitTrigger,
    FinalFlag,
    Castle,
}

/// A fixture at fixed world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub kind: FixtureKind,
    pub pos: Vec2,
    /// Horizontal extent (0 for point-like fixtures)
    pub width: f32,
}

/// Decorative categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneryCategory {
    Cloud,
    Mountain,
    Bush,
    Fence,
}

impl SceneryCategory {
    /// Scatter order (fixed: the RNG stream depends on it)
    pub const ALL: [SceneryCategory; 4] = [
        SceneryCategory::Cloud,
        SceneryCategory::Mountain,
        SceneryCategory::Bush,
        SceneryCategory::Fence,
    ];

    /// Ground-standing props avoid holes; clouds float free
    pub fn needs_ground(&self) -> bool {
        !matches!(self, SceneryCategory::Cloud)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SceneryCategory::Cloud => "cloud",
            SceneryCategory::Mountain => "mountain",
            SceneryCategory::Bush => "bush",
            SceneryCategory::Fence => "fence",
        }
    }
}

/// One decorative, non-colliding prop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneryItem {
    pub category: SceneryCategory,
    pub pos: Vec2,
    /// Sprite variant (0 or 1); fences have a single sprite
    pub variant: u8,
    /// Tiled width for fences
    pub width: Option<f32>,
}

/// Walking enemy spawn point on the ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Vec2,
}

/// A fully generated level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Seed the level was built from (None for entropy builds)
    pub seed: Option<u32>,
    pub variant: LevelVariant,
    pub world_width: f32,
    /// One entry per sequencer iteration, left to right
    pub decisions: Vec<PlacementDecision>,
    /// Holes in insertion (left-to-right) order
    pub holes: Vec<Hole>,
    pub fall_guards: Vec<FallGuard>,
    pub fixtures: Vec<Fixture>,
    pub scenery: Vec<SceneryItem>,
    pub enemies: Vec<EnemySpawn>,
}

impl Level {
    /// All placed structures, left to right
    pub fn structures(&self) -> impl Iterator<Item = &StructureSpec> {
        self.decisions.iter().filter_map(|d| d.structure())
    }

    pub fn fixture(&self, kind: FixtureKind) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.kind == kind)
    }

    pub fn scenery_count(&self, category: SceneryCategory) -> usize {
        self.scenery.iter().filter(|s| s.category == category).count()
    }

    /// Serialize for the JS engine
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hole_blocks_approach_and_body() {
        let hole = Hole { start: 1000.0, end: 1200.0 };
        assert_eq!(hole.width(), 200.0);
        assert!(hole.blocks(850.0, 150.0));
        assert!(hole.blocks(1200.0, 150.0));
        assert!(!hole.blocks(849.0, 150.0));
        assert!(!hole.blocks(1201.0, 150.0));
    }

    #[test]
    fn test_decision_accessors() {
        let spec = StructureSpec {
            kind: StructureKind::MysteryBlock,
            anchor_x: 400.0,
            occupied_segments: 1,
            mount: Mount::Floating { height: 100.0 },
        };
        let with = PlacementDecision::GroundWithStructure {
            x: 400.0,
            width: 200.0,
            structure: spec,
        };
        assert_eq!(with.x(), 400.0);
        assert_eq!(with.structure(), Some(&spec));
        assert!(!with.is_hole());

        let hole = PlacementDecision::Hole(Hole { start: 600.0, end: 800.0 });
        assert!(hole.is_hole());
        assert_eq!(hole.x(), 600.0);
        assert!(hole.structure().is_none());
    }

    #[test]
    fn test_only_clouds_float() {
        assert!(!SceneryCategory::Cloud.needs_ground());
        assert!(SceneryCategory::Mountain.needs_ground());
        assert!(SceneryCategory::Fence.needs_ground());
    }
}
