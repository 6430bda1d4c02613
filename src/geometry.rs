//! Plain 2D value types shared by the placement, hearts and fireworks code.
//! All units are CSS pixels in viewport space (origin top-left).

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero or negative (or NaN) extents mean "not laid out yet".
    pub fn is_measurable(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn at(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }
    pub fn top(&self) -> f64 {
        self.origin.y
    }
    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Grow on every side by `pad`.
    pub fn inflate(&self, pad: f64) -> Rect {
        Rect::new(
            self.origin.x - pad,
            self.origin.y - pad,
            self.size.width + pad * 2.0,
            self.size.height + pad * 2.0,
        )
    }

    /// Touching edges do not count as an intersection.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Inclusive range of top-left positions a box may occupy inside a container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Placement area for a `item` sized box inside `container`, keeping
    /// `margin` clear on every side. An axis too small to honour both margins
    /// collapses onto `margin`.
    pub fn inset(container: Size, item: Size, margin: f64) -> Self {
        let axis = |extent: f64, len: f64| {
            let hi = extent - len - margin;
            if hi < margin { margin } else { hi }
        };
        Self {
            min: Point::new(margin, margin),
            max: Point::new(
                axis(container.width, item.width),
                axis(container.height, item.height),
            ),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_ignores_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.0, 9.0, 5.0, 5.0)));
    }

    #[test]
    fn test_inflate_grows_every_side() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).inflate(5.0);
        assert_eq!(r, Rect::new(5.0, 15.0, 40.0, 50.0));
    }

    #[test]
    fn test_bounds_inset() {
        let b = Bounds::inset(Size::new(800.0, 600.0), Size::new(120.0, 44.0), 16.0);
        assert_eq!(b.min, Point::new(16.0, 16.0));
        assert_eq!(b.max, Point::new(664.0, 540.0));
    }

    #[test]
    fn test_bounds_collapse_when_container_too_small() {
        let b = Bounds::inset(Size::new(100.0, 50.0), Size::new(120.0, 44.0), 16.0);
        assert_eq!(b.max, b.min);
        assert_eq!(b.diagonal(), 0.0);
        assert!(b.contains(Point::new(16.0, 16.0)));
    }

    #[test]
    fn test_clamp_pulls_inside() {
        let b = Bounds::inset(Size::new(200.0, 200.0), Size::new(20.0, 20.0), 10.0);
        assert_eq!(b.clamp(Point::new(-5.0, 500.0)), Point::new(10.0, 170.0));
    }
}
