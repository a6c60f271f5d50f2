/// A range of ray parameters or other reals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Same lower bound, new upper bound.
    pub fn with_max(&self, max: f64) -> Interval {
        Interval::new(self.min, max)
    }

    /// The closed unit interval [0, 1].
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Everything in front of `min`.
    pub const fn from_min(min: f64) -> Interval {
        Interval::new(min, f64::INFINITY)
    }
}
