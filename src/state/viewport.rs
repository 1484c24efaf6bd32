//! Visible data window (the plot camera).
//!
//! The x range selects which buffer positions are drawn and exported; the y
//! range is the vertical scale driven by auto-scale or manual zooming.

/// Default initial upper bound of the y axis.
pub const DEFAULT_INITIAL_Y_MAX: f64 = 16384.0;

/// Zoom step applied per wheel notch or zoom key.
pub const ZOOM_STEP: f64 = 1.25;

/// Fraction of the visible width moved by one pan step.
pub const PAN_STEP: f64 = 0.1;

/// Narrowest x window, in samples.
pub const MIN_X_SPAN: f64 = 8.0;

/// Closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl AxisRange {
    /// Range from two bounds, reordered if given backwards.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Range of width `span` centred on `center`.
    pub fn centered(center: f64, span: f64) -> Self {
        let half = span.abs() / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Whether `value` lies inside the closed range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Visible x and y ranges over a buffer of `sample_count` positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    x: AxisRange,
    y: AxisRange,
    sample_count: usize,
}

impl Viewport {
    /// Full-width viewport with y in `[0, initial_y_max]`.
    pub fn new(sample_count: usize, initial_y_max: f64) -> Self {
        let sample_count = sample_count.max(1);
        Self {
            x: full_x(sample_count),
            y: AxisRange::new(0.0, initial_y_max),
            sample_count,
        }
    }

    /// Visible buffer positions.
    pub fn x(&self) -> AxisRange {
        self.x
    }

    /// Visible value range.
    pub fn y(&self) -> AxisRange {
        self.y
    }

    /// Replace the y range (used by auto-scale).
    pub fn set_y(&mut self, range: AxisRange) {
        self.y = range;
    }

    /// Zoom the y range around its centre. `factor > 1` zooms in.
    pub fn zoom_y(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        self.y = AxisRange::centered(self.y.center(), self.y.span() / factor);
    }

    /// Zoom the x range around its centre. `factor > 1` zooms in.
    ///
    /// The result is at least `MIN_X_SPAN` wide (or the full buffer, if
    /// smaller) and kept inside `[0, sample_count]`.
    pub fn zoom_x(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let full = self.sample_count as f64;
        let span = (self.x.span() / factor).clamp(MIN_X_SPAN.min(full), full);
        self.x = self.clamp_x(AxisRange::centered(self.x.center(), span));
    }

    /// Move the x range by `fraction` of its width (negative = towards older samples).
    pub fn pan_x(&mut self, fraction: f64) {
        let offset = self.x.span() * fraction;
        self.x = self.clamp_x(AxisRange {
            min: self.x.min + offset,
            max: self.x.max + offset,
        });
    }

    /// Show the whole buffer again.
    pub fn reset_x(&mut self) {
        self.x = full_x(self.sample_count);
    }

    fn clamp_x(&self, range: AxisRange) -> AxisRange {
        let full = self.sample_count as f64;
        let span = range.span().min(full);
        let min = range.min.clamp(0.0, full - span);
        AxisRange {
            min,
            max: min + span,
        }
    }
}

fn full_x(sample_count: usize) -> AxisRange {
    AxisRange::new(0.0, sample_count as f64)
}
