#![forbid(unsafe_code)]

//! Pixel-space helpers shared by chart renderers.

pub type Unit = euclid::UnknownUnit;

pub type Rect = euclid::Rect<f64, Unit>;

/// Lays bars out left to right, one `bar_width + gap` slot each, standing on `baseline`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSlots {
    pub origin_x: f64,
    pub baseline: f64,
    pub bar_width: f64,
    pub gap: f64,
}

impl BarSlots {
    pub fn slot_width(&self) -> f64 {
        self.bar_width + self.gap
    }

    /// Total width taken by `count` slots.
    pub fn span(&self, count: usize) -> f64 {
        self.slot_width() * count as f64
    }

    /// Bar rectangle of the `index`-th slot; the bar is centered in its slot.
    pub fn bar_rect(&self, index: usize, height: f64) -> Rect {
        let height = height.max(0.0);
        euclid::rect(
            self.origin_x + self.gap / 2.0 + index as f64 * self.slot_width(),
            self.baseline - height,
            self.bar_width,
            height,
        )
    }
}

/// Y coordinate of a normalized `ratio` on a value axis of `plot_height` pixels.
pub fn ratio_to_y(baseline: f64, plot_height: f64, ratio: f64) -> f64 {
    baseline - ratio * plot_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_slots_center_bars_in_slots() {
        let slots = BarSlots {
            origin_x: 46.4,
            baseline: 312.0,
            bar_width: 56.0,
            gap: 24.0,
        };
        let r = slots.bar_rect(1, 100.0);
        assert!((r.min_x() - 138.4).abs() < 1e-9);
        assert_eq!(r.min_y(), 212.0);
        assert_eq!(r.max_y(), 312.0);
        assert!((r.center().x - 166.4).abs() < 1e-9);
        assert_eq!(slots.span(3), 240.0);
        assert_eq!(slots.bar_rect(0, -5.0).height(), 0.0);
    }

    #[test]
    fn ratio_to_y_measures_up_from_baseline() {
        assert_eq!(ratio_to_y(300.0, 200.0, 0.0), 300.0);
        assert_eq!(ratio_to_y(300.0, 200.0, 1.0), 100.0);
    }
}
