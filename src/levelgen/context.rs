//! Per-build generation state
//!
//! Owns the config, the RNG stream and the hole list for one level build.
//! Constructed fresh for every level and dropped once the [`Level`] is
//! assembled.
//!
//! [`Level`]: super::Level

use super::level::Hole;
use super::rng::LevelRng;
use crate::config::{ConfigError, WorldConfig};
use crate::consts::STRUCTURE_LEAD_SEGMENTS;

pub struct GenerationContext {
    pub config: WorldConfig,
    pub rng: LevelRng,
    /// Holes recorded so far, left to right
    pub holes: Vec<Hole>,
}

impl GenerationContext {
    pub fn new(config: WorldConfig, rng: LevelRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            holes: Vec::new(),
        })
    }

    /// True inside the start reserve or the end reserve (boundaries included)
    pub fn is_within_reserve_zone(&self, x: f32) -> bool {
        x <= self.config.start_reserve || x >= self.config.end_reserve_start()
    }

    /// True if any part of `[start, end]` touches a reserve zone
    pub fn span_touches_reserve(&self, start: f32, end: f32) -> bool {
        self.is_within_reserve_zone(start) || self.is_within_reserve_zone(end)
    }

    /// Structures need clear ground before them and must stay out of the reserves
    pub fn is_structure_anchor(&self, x: f32) -> bool {
        let lead = self.config.viewport_width + STRUCTURE_LEAD_SEGMENTS * self.config.piece_stride();
        x > lead && !self.is_within_reserve_zone(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelVariant;

    fn ctx(variant: LevelVariant) -> GenerationContext {
        let config = WorldConfig::for_viewport(1000.0, 1100.0, variant);
        GenerationContext::new(config, LevelRng::seeded(1)).unwrap()
    }

    #[test]
    fn test_reserve_zone_boundaries() {
        let c = ctx(LevelVariant::Overworld);
        assert!(c.is_within_reserve_zone(0.0));
        assert!(c.is_within_reserve_zone(2000.0));
        assert!(!c.is_within_reserve_zone(2000.5));
        assert!(!c.is_within_reserve_zone(8999.0));
        assert!(c.is_within_reserve_zone(9000.0));
        assert!(c.is_within_reserve_zone(20000.0));
    }

    #[test]
    fn test_underground_end_reserve_is_wider() {
        let c = ctx(LevelVariant::Underground);
        assert!(c.is_within_reserve_zone(8600.0));
        assert!(!c.is_within_reserve_zone(8400.0));
    }

    #[test]
    fn test_span_touches_reserve() {
        let c = ctx(LevelVariant::Overworld);
        assert!(c.span_touches_reserve(1900.0, 2100.0));
        assert!(c.span_touches_reserve(8900.0, 9100.0));
        assert!(!c.span_touches_reserve(2200.0, 2400.0));
    }

    #[test]
    fn test_structure_anchor_requires_lead_and_clear_zone() {
        let c = ctx(LevelVariant::Overworld);
        assert!(!c.is_structure_anchor(1400.0));
        assert!(!c.is_structure_anchor(2000.0));
        assert!(c.is_structure_anchor(2200.0));
        assert!(!c.is_structure_anchor(9000.0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = WorldConfig::for_viewport(1000.0, 1100.0, LevelVariant::Overworld);
        config.segment_count = 0;
        assert!(GenerationContext::new(config, LevelRng::seeded(1)).is_err());
    }
}
