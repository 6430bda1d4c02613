//! Page tunables. The compiled-in defaults are what ships; with the
//! `serde_json` feature a page may carry
//! `<script id="valentine-config" type="application/json">` and override any
//! subset of the fields.

use crate::evade::EvadeConfig;
use crate::hearts::HeartField;

/// Id of the optional inline JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "valentine-config";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageConfig {
    pub evade: EvadeConfig,
    pub floating_hearts: HeartField,
    pub success_hearts: HeartField,
    /// Block size of the pixelated fireworks, in canvas pixels.
    pub fireworks_pixel: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            evade: EvadeConfig::default(),
            floating_hearts: HeartField::floating(),
            success_hearts: HeartField::success(),
            fireworks_pixel: 10,
        }
    }
}

impl PageConfig {
    /// Most hearts a single field may spawn.
    pub const HEART_CAP: usize = 200;

    /// Bring externally supplied values back into ranges the page can use.
    pub fn sanitized(self) -> Self {
        let cap = |mut field: HeartField| {
            field.count = field.count.min(Self::HEART_CAP);
            field
        };
        Self {
            evade: self.evade.sanitized(),
            floating_hearts: cap(self.floating_hearts),
            success_hearts: cap(self.success_hearts),
            fireworks_pixel: self.fireworks_pixel.max(1),
        }
    }
}

#[cfg(feature = "serde_json")]
impl PageConfig {
    /// Parse an override block. Missing fields keep their defaults; values out
    /// of range are repaired rather than rejected.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(text).map(Self::sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PageConfig::default();
        assert_eq!(cfg.evade.cursor_clearance, 140.0);
        assert_eq!(cfg.floating_hearts.count, 26);
        assert_eq!(cfg.success_hearts.count, 28);
        assert_eq!(cfg.fireworks_pixel, 10);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_partial_json_overlays_defaults() {
        let cfg = PageConfig::from_json(r#"{"evade":{"proximity_radius":200.0},"fireworks_pixel":6}"#).unwrap();
        assert_eq!(cfg.evade.proximity_radius, 200.0);
        assert_eq!(cfg.evade.margin, 16.0);
        assert_eq!(cfg.fireworks_pixel, 6);
        assert_eq!(cfg.floating_hearts, HeartField::floating());
    }

    #[test]
    fn test_sanitized_caps_hearts_and_pixel() {
        let mut cfg = PageConfig::default();
        cfg.floating_hearts.count = 10_000;
        cfg.fireworks_pixel = 0;
        let cfg = cfg.sanitized();
        assert_eq!(cfg.floating_hearts.count, PageConfig::HEART_CAP);
        assert_eq!(cfg.success_hearts.count, 28);
        assert_eq!(cfg.fireworks_pixel, 1);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_inverted_dodge_override_is_repaired() {
        let cfg = PageConfig::from_json(r#"{"evade":{"min_dodge":300.0}}"#).unwrap();
        assert!(cfg.evade.min_dodge <= cfg.evade.max_dodge);
        assert_eq!((cfg.evade.min_dodge, cfg.evade.max_dodge), (260.0, 300.0));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_bad_json_is_an_error() {
        assert!(PageConfig::from_json("{not json").is_err());
    }
}
