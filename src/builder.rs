//! Level hand-off to the engine
//!
//! A [`WorldBuilder`] receives every object of a finished [`Level`] exactly
//! once, in draw order. The browser side implements it to create sprites,
//! physics bodies and collision handlers; generation never calls the engine.

use std::fmt;

use crate::levelgen::{
    EnemySpawn, FallGuard, Fixture, Hole, Level, PlacementDecision, SceneryItem, StructureSpec,
};

/// Consumer of generated level objects
pub trait WorldBuilder {
    /// Solid, collidable ground piece
    fn ground(&mut self, x: f32, width: f32);

    /// Gap in the ground track
    fn hole(&mut self, hole: &Hole);

    /// Structure on the ground piece most recently passed to [`Self::ground`]
    fn structure(&mut self, _spec: &StructureSpec) {}

    fn fall_guard(&mut self, _guard: &FallGuard) {}

    fn fixture(&mut self, _fixture: &Fixture) {}

    fn scenery(&mut self, _item: &SceneryItem) {}

    fn enemy(&mut self, _spawn: &EnemySpawn) {}
}

impl Level {
    /// Feed every object to `builder`: track pieces (with their structures),
    /// fall guards, fixtures, scenery, enemies
    pub fn populate<B: WorldBuilder>(&self, builder: &mut B) {
        for decision in &self.decisions {
            match decision {
                PlacementDecision::SolidGround { x, width } => builder.ground(*x, *width),
                PlacementDecision::Hole(hole) => builder.hole(hole),
                PlacementDecision::GroundWithStructure {
                    x,
                    width,
                    structure,
                } => {
                    builder.ground(*x, *width);
                    builder.structure(structure);
                }
            }
        }
        for guard in &self.fall_guards {
            builder.fall_guard(guard);
        }
        for fixture in &self.fixtures {
            builder.fixture(fixture);
        }
        for item in &self.scenery {
            builder.scenery(item);
        }
        for spawn in &self.enemies {
            builder.enemy(spawn);
        }
    }
}

/// One character per ground piece: `=` ground, `_` hole, `#` structure anchor
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    cells: String,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.cells
    }
}

impl WorldBuilder for ProfileBuilder {
    fn ground(&mut self, _x: f32, _width: f32) {
        self.cells.push('=');
    }

    fn hole(&mut self, _hole: &Hole) {
        self.cells.push('_');
    }

    fn structure(&mut self, _spec: &StructureSpec) {
        self.cells.pop();
        self.cells.push('#');
    }
}

impl fmt::Display for ProfileBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cells)
    }
}
