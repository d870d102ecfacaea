//! Random world X coordinates that keep ground-bound objects out of holes

use super::context::GenerationContext;
use crate::consts::{HOLE_APPROACH_MARGIN, MAX_COORDINATE_ATTEMPTS};

impl GenerationContext {
    /// Sampling range for generic scenery or for entities.
    ///
    /// Entities stay away from the start screen and the final stretch.
    pub fn coordinate_range(&self, for_entity: bool) -> (f32, f32) {
        let c = &self.config;
        if for_entity {
            (c.viewport_width * 1.5, c.world_width - c.viewport_width * 3.0)
        } else {
            (c.viewport_width, c.world_width)
        }
    }

    /// Distance before a hole's start that ground-bound samples also reject
    pub fn hole_approach(&self) -> f32 {
        self.config.segment_width * HOLE_APPROACH_MARGIN
    }

    /// True if `x` lands in or just before any recorded hole
    pub fn is_over_hole(&self, x: f32) -> bool {
        let approach = self.hole_approach();
        self.holes.iter().any(|hole| hole.blocks(x, approach))
    }

    /// Draw a world X coordinate.
    ///
    /// Without `needs_ground` the first draw is returned. Otherwise draws that
    /// fall inside `[hole.start - 1.5 * segment_width, hole.end]` are retried up
    /// to [`MAX_COORDINATE_ATTEMPTS`] times before falling back to
    /// [`Self::first_safe_coordinate`].
    pub fn sample_coordinate(&mut self, for_entity: bool, needs_ground: bool) -> f32 {
        let (start, end) = self.coordinate_range(for_entity);

        if !needs_ground {
            return self.rng.random_between(start, end);
        }

        for _ in 0..MAX_COORDINATE_ATTEMPTS {
            let x = self.rng.random_between(start, end);
            if !self.is_over_hole(x) {
                return x;
            }
        }

        let fallback = self.first_safe_coordinate(start, end);
        log::warn!(
            "Coordinate sampler gave up after {} attempts, using x={}",
            MAX_COORDINATE_ATTEMPTS,
            fallback
        );
        fallback
    }

    /// Leftmost whole-pixel X at or after `start` that clears every hole,
    /// clamped to `end`
    pub fn first_safe_coordinate(&self, start: f32, end: f32) -> f32 {
        let approach = self.hole_approach();
        let mut x = start.trunc();

        // Each step moves past one hole for good
        for _ in 0..=self.holes.len() {
            match self.holes.iter().find(|hole| hole.blocks(x, approach)) {
                Some(hole) => x = hole.end.floor() + 1.0,
                None => break,
            }
        }

        if x > end {
            log::warn!("No hole-free coordinate in [{}, {}]", start, end);
            end.trunc()
        } else {
            x
        }
    }
}
