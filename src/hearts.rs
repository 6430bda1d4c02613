//! Decorative hearts: the drifting background field, the burst shown on the
//! success panel, and the little "pop" left behind by every click.
//!
//! Generation is pure (ranges in, specs out); `page` turns specs into spans.

use std::ops::Range;

use rand::Rng;
use rand::seq::SliceRandom;

pub const HEART_GLYPH: &str = "\u{2665}";

pub const HEART_COLORS: &[&str] = &["#e95b83", "#ff7aa2", "#d94b6f", "#f2a3b7"];

/// Count and value ranges for one field of hearts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeartField {
    pub count: usize,
    /// Horizontal position, percent of the container width.
    pub left_pct: Range<f64>,
    pub size_px: Range<f64>,
    pub delay_s: Range<f64>,
    pub duration_s: Range<f64>,
    pub opacity: Range<f64>,
}

impl HeartField {
    /// Background field behind the question.
    pub fn floating() -> Self {
        Self {
            count: 26,
            left_pct: 0.0..100.0,
            size_px: 14.0..32.0,
            delay_s: 0.0..6.0,
            duration_s: 8.0..16.0,
            opacity: 0.3..0.8,
        }
    }

    /// Burst spawned when the celebration opens.
    pub fn success() -> Self {
        Self {
            count: 28,
            ..Self::floating()
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<HeartSpec> {
        (0..self.count)
            .map(|_| HeartSpec {
                left_pct: pick(rng, &self.left_pct),
                size_px: pick(rng, &self.size_px),
                delay_s: pick(rng, &self.delay_s),
                duration_s: pick(rng, &self.duration_s),
                opacity: pick(rng, &self.opacity),
                color: pick_color(rng),
            })
            .collect()
    }
}

/// One generated heart.
#[derive(Clone, Debug, PartialEq)]
pub struct HeartSpec {
    pub left_pct: f64,
    pub size_px: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    pub opacity: f64,
    pub color: &'static str,
}

impl HeartSpec {
    /// Inline style for the span carrying this heart.
    pub fn style(&self) -> String {
        format!(
            "left:{:.2}%;font-size:{:.1}px;animation-delay:{:.2}s;animation-duration:{:.2}s;opacity:{:.2};color:{};",
            self.left_pct, self.size_px, self.delay_s, self.duration_s, self.opacity, self.color
        )
    }
}

// --- Click pops ----------------------------------------------------------------

pub const POP_SIZE_PX: Range<f64> = 16.0..28.0;
pub const POP_LIFETIME_MS: u32 = 1200;

/// Heart dropped at a click position, removed after [`POP_LIFETIME_MS`].
#[derive(Clone, Debug, PartialEq)]
pub struct PopHeart {
    pub x: f64,
    pub y: f64,
    pub size_px: f64,
}

impl PopHeart {
    pub fn at<R: Rng + ?Sized>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            size_px: pick(rng, &POP_SIZE_PX),
        }
    }

    pub fn style(&self) -> String {
        format!("left:{}px;top:{}px;font-size:{:.1}px;", self.x, self.y, self.size_px)
    }
}

// Empty ranges (start == end) are allowed in configs and mean "always start".
fn pick<R: Rng + ?Sized>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.end > range.start {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

fn pick_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    HEART_COLORS.choose(rng).copied().unwrap_or("#e95b83")
}
