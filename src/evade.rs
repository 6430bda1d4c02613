//! Evasive "No" button placement.
//!
//! Everything here is a pure function of the measured layout, the last known
//! cursor position and a random source, so it runs (and is tested) off the
//! browser. The page module measures the DOM, feeds a [`Layout`] in and writes
//! the returned position back out.

use rand::Rng;

use crate::geometry::{Bounds, Point, Rect, Size};

// --- Tunables ----------------------------------------------------------------

/// Thresholds for the placement search. Defaults are the shipped constants; the
/// `serde_json` feature lets a page override any subset of them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvadeConfig {
    /// Gap kept between the button and every container edge.
    pub margin: f64,
    /// Extra space around "Yes" that "No" may not enter.
    pub yes_padding: f64,
    /// Minimum distance between the new button center and the cursor.
    pub cursor_clearance: f64,
    /// Pointer distance (to the button center) that triggers a dodge.
    pub proximity_radius: f64,
    /// Candidates sampled per dodge before falling back.
    pub max_attempts: u32,
    /// Dodge distance as a fraction of the placement area diagonal ...
    pub dodge_fraction: f64,
    /// ... clamped into `[min_dodge, max_dodge]`.
    pub min_dodge: f64,
    pub max_dodge: f64,
}

impl Default for EvadeConfig {
    fn default() -> Self {
        Self {
            margin: 16.0,
            yes_padding: 12.0,
            cursor_clearance: 140.0,
            proximity_radius: 120.0,
            max_attempts: 48,
            dodge_fraction: 0.25,
            min_dodge: 80.0,
            max_dodge: 260.0,
        }
    }
}

impl EvadeConfig {
    /// Upper limit on `max_attempts`; every sample runs inside an event handler.
    pub const ATTEMPT_CAP: u32 = 512;

    /// Required displacement for a placement area. Never larger than what the
    /// area can physically offer.
    pub fn dodge_distance(&self, bounds: &Bounds) -> f64 {
        let diag = bounds.diagonal();
        // max/min instead of clamp: inverted or NaN bounds must not panic.
        (diag * self.dodge_fraction)
            .max(self.min_dodge)
            .min(self.max_dodge)
            .min(diag)
            .max(0.0)
    }

    /// Repair values an external config may carry: non-finite or negative
    /// distances fall back to the defaults, inverted dodge bounds are swapped
    /// and the attempt budget is kept within `1..=ATTEMPT_CAP`.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let distance = |v: f64, d: f64| if v.is_finite() && v >= 0.0 { v } else { d };
        let mut min_dodge = distance(self.min_dodge, defaults.min_dodge);
        let mut max_dodge = distance(self.max_dodge, defaults.max_dodge);
        if min_dodge > max_dodge {
            std::mem::swap(&mut min_dodge, &mut max_dodge);
        }
        Self {
            margin: distance(self.margin, defaults.margin),
            yes_padding: distance(self.yes_padding, defaults.yes_padding),
            cursor_clearance: distance(self.cursor_clearance, defaults.cursor_clearance),
            proximity_radius: distance(self.proximity_radius, defaults.proximity_radius),
            max_attempts: self.max_attempts.clamp(1, Self::ATTEMPT_CAP),
            dodge_fraction: distance(self.dodge_fraction, defaults.dodge_fraction),
            min_dodge,
            max_dodge,
        }
    }
}

// --- Inputs / outputs --------------------------------------------------------

/// Measured geometry at the moment a trigger fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub container: Size,
    pub no: Rect,
    pub yes: Rect,
}

impl Layout {
    /// `None` while anything is still unmeasured (element not mounted, display
    /// none, zero-sized viewport).
    pub fn measured(container: Size, no: Rect, yes: Rect) -> Option<Self> {
        let finite = |r: &Rect| {
            r.origin.x.is_finite() && r.origin.y.is_finite() && r.size.is_measurable()
        };
        if !container.is_measurable() || !finite(&no) || !finite(&yes) {
            return None;
        }
        Some(Self { container, no, yes })
    }

    /// Replace the measured "No" origin with the last applied one. While a CSS
    /// transition runs the rendered box lags behind where the button is going.
    pub fn settled(mut self, applied: Option<Point>) -> Self {
        if let Some(at) = applied {
            self.no.origin = at;
        }
        self
    }
}

/// How the new position was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementKind {
    /// A candidate met every constraint.
    Accepted,
    /// Best candidate that avoids "Yes" and the cursor, short on dodge distance.
    Fallback,
    /// Nothing qualified; the button keeps its previous position.
    Stayed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// New top-left corner of the "No" button.
    pub position: Point,
    pub kind: PlacementKind,
}

impl Placement {
    pub fn moved(&self) -> bool {
        self.kind != PlacementKind::Stayed
    }
}

// --- Search ------------------------------------------------------------------

/// Pick a new top-left for "No" by sampling at most `config.max_attempts`
/// candidates uniformly inside the container bounds.
pub fn place_evasive<R: Rng + ?Sized>(
    layout: &Layout,
    cursor: Point,
    config: &EvadeConfig,
    rng: &mut R,
) -> Placement {
    let size = layout.no.size;
    let previous = layout.no.origin;
    let bounds = Bounds::inset(layout.container, size, config.margin);
    let keep_out = layout.yes.inflate(config.yes_padding);
    let dodge = config.dodge_distance(&bounds);

    let mut best: Option<(Point, f64)> = None;
    for _ in 0..config.max_attempts {
        let candidate = sample(&bounds, rng);
        let rect = Rect::at(candidate, size);
        if rect.intersects(&keep_out) {
            continue;
        }
        if rect.center().distance(cursor) < config.cursor_clearance {
            continue;
        }
        let travel = candidate.distance(previous);
        if travel >= dodge {
            return Placement {
                position: candidate,
                kind: PlacementKind::Accepted,
            };
        }
        if best.is_none_or(|(_, far)| travel > far) {
            best = Some((candidate, travel));
        }
    }

    match best {
        Some((position, _)) => Placement {
            position,
            kind: PlacementKind::Fallback,
        },
        None => Placement {
            position: previous,
            kind: PlacementKind::Stayed,
        },
    }
}

fn sample<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Point {
    let axis = |rng: &mut R, lo: f64, hi: f64| if hi > lo { rng.gen_range(lo..=hi) } else { lo };
    let x = axis(rng, bounds.min.x, bounds.max.x);
    let y = axis(rng, bounds.min.y, bounds.max.y);
    Point::new(x, y)
}

/// True when the pointer sits within the proximity radius of the button center.
pub fn is_near(no: &Rect, cursor: Point, config: &EvadeConfig) -> bool {
    no.center().distance(cursor) < config.proximity_radius
}

/// Pointer trigger: dodge only when the cursor is close enough, otherwise the
/// button stays exactly where it is (`None`).
pub fn evade_pointer<R: Rng + ?Sized>(
    layout: &Layout,
    cursor: Point,
    config: &EvadeConfig,
    rng: &mut R,
) -> Option<Placement> {
    if !is_near(&layout.no, cursor, config) {
        return None;
    }
    Some(place_evasive(layout, cursor, config, rng))
}

/// Focus / keyboard trigger: there is no pointer, so the button flees its own
/// center.
pub fn evade_focus<R: Rng + ?Sized>(layout: &Layout, config: &EvadeConfig, rng: &mut R) -> Placement {
    place_evasive(layout, layout.no.center(), config, rng)
}

/// Resting spot beside "Yes", used on load and after a resize.
pub fn park_beside(yes: &Rect, no: Size, container: Size) -> Point {
    const GAP: f64 = 20.0;
    let bounds = Bounds::inset(container, no, GAP);
    bounds.clamp(Point::new(yes.right() + GAP, yes.top()))
}

// --- Yes growth --------------------------------------------------------------

/// "Yes" gets a little bigger every time "No" runs away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YesGrowth {
    scale: f64,
}

impl YesGrowth {
    pub const STEP: f64 = 0.06;
    pub const MAX_SCALE: f64 = 1.6;

    pub fn new() -> Self {
        Self { scale: 1.0 }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Bump and return the new scale.
    pub fn grow(&mut self) -> f64 {
        self.scale = (self.scale + Self::STEP).min(Self::MAX_SCALE);
        self.scale
    }

    pub fn transform(&self) -> String {
        format!("scale({})", self.scale)
    }
}

impl Default for YesGrowth {
    fn default() -> Self {
        Self::new()
    }
}
