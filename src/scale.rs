//! Value-to-pixel mapping for the category (x) and linear (y) axes.

/// Plotted pixel area in root-surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotArea {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PlotArea {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Linear map from a value domain onto a pixel range. The range may be
/// inverted (y axes map the domain minimum to the bottom pixel).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (lo, hi) = domain;
        let domain = if (hi - lo).abs() < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            domain
        };
        Self { domain, range }
    }

    /// Vertical scale over `area`: domain minimum at the bottom edge.
    pub fn vertical(domain: (f64, f64), area: &PlotArea) -> Self {
        Self::new(domain, (area.bottom as f64, area.top as f64))
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn pixel_for(&self, v: f64) -> i32 {
        self.map(v).round() as i32
    }

    pub fn value_for(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Category axis: index `i` sits at x-value `i`.
///
/// With `offset` (bar charts) every category gets its own band and indices sit at
/// band centers; without it (line charts) the first and last categories touch the
/// plot edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryScale {
    pub count: usize,
    pub offset: bool,
    linear: LinearScale,
}

impl CategoryScale {
    pub fn new(count: usize, offset: bool, area: &PlotArea) -> Self {
        let domain = Self::domain_for(count, offset);
        Self {
            count,
            offset,
            linear: LinearScale::new(domain, (area.left as f64, area.right as f64)),
        }
    }

    /// The x-value domain the chart should be built over.
    pub fn domain_for(count: usize, offset: bool) -> (f64, f64) {
        if offset || count < 2 {
            (-0.5, count.max(1) as f64 - 0.5)
        } else {
            (0.0, (count - 1) as f64)
        }
    }

    pub fn pixel_for(&self, index: usize) -> i32 {
        self.linear.pixel_for(index as f64)
    }

    /// Width of one category band in pixels.
    pub fn band_width(&self) -> f64 {
        (self.linear.map(1.0) - self.linear.map(0.0)).abs()
    }

    /// Nearest category for a pixel x position; `None` on an empty axis.
    pub fn index_at(&self, px: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let v = self.linear.value_for(px).round();
        Some(v.clamp(0.0, (self.count - 1) as f64) as usize)
    }
}

/// Expand `(min, max)` outward to multiples of a 1/2/5 step so roughly
/// `ticks` intervals cover the range. Returns `(min, max, step)`.
pub fn nice_range(min: f64, max: f64, ticks: usize) -> (f64, f64, f64) {
    let (min, max) = if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    };
    let raw = (max - min) / ticks.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let step = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    } * mag;
    ((min / step).floor() * step, (max / step).ceil() * step, step)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: PlotArea = PlotArea {
        left: 100,
        top: 50,
        right: 700,
        bottom: 350,
    };

    #[test]
    fn line_categories_touch_edges() {
        let x = CategoryScale::new(7, false, &AREA);
        assert_eq!(x.pixel_for(0), 100);
        assert_eq!(x.pixel_for(6), 700);
        assert_eq!(x.pixel_for(3), 400);
    }

    #[test]
    fn bar_categories_sit_at_band_centers() {
        let x = CategoryScale::new(6, true, &AREA);
        assert_eq!(x.pixel_for(0), 150);
        assert_eq!(x.pixel_for(5), 650);
        assert!((x.band_width() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn vertical_scale_is_inverted() {
        let y = LinearScale::vertical((0.0, 100.0), &AREA);
        assert_eq!(y.pixel_for(0.0), 350);
        assert_eq!(y.pixel_for(100.0), 50);
        assert_eq!(y.pixel_for(50.0), 200);
        assert!((y.value_for(200.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn index_at_snaps_and_clamps() {
        let x = CategoryScale::new(7, false, &AREA);
        assert_eq!(x.index_at(405.0), Some(3));
        assert_eq!(x.index_at(-40.0), Some(0));
        assert_eq!(x.index_at(9000.0), Some(6));
        assert_eq!(CategoryScale::new(0, false, &AREA).index_at(10.0), None);
    }

    #[test]
    fn nice_range_rounds_outward() {
        assert_eq!(nice_range(19.0, 90.0, 10), (10.0, 90.0, 10.0));
        assert_eq!(nice_range(0.0, 86.0, 10), (0.0, 90.0, 10.0));
        let (lo, hi, _) = nice_range(5.0, 5.0, 10);
        assert!(lo < 5.0 && hi > 5.0);
    }
}
