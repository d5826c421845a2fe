use kurbo::{BezPath, Point};

/// Sample count used for the decorative trend curve.
pub const TREND_SAMPLES: usize = 50;

/// Domain of the trend curve, in model years from "now".
pub const TREND_YEARS: f64 = 5.0;

/// Convex growth function behind the mini chart: `1 + 0.8t + 0.1t^2`.
pub fn baseline(t: f64) -> f64 {
    1.0 + 0.8 * t + 0.1 * t * t
}

/// `n` ordered `(t, baseline(t))` samples over `[0, TREND_YEARS]`.
/// Counts below two are clamped so the result always forms a curve.
pub fn trend_samples(n: usize) -> Vec<Point> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let t = TREND_YEARS * (i as f64) / ((n - 1) as f64);
            Point::new(t, baseline(t))
        })
        .collect()
}

/// Open polyline through `points`.
pub fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
    }
    for p in iter {
        path.line_to(*p);
    }
    path
}

/// Closed region between a lower and an upper polyline (the uncertainty
/// band). The upper edge is traversed in reverse so the path stays simple.
pub fn band(lower: &[Point], upper: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut points = lower.iter().copied().chain(upper.iter().rev().copied());
    if let Some(first) = points.next() {
        path.move_to(first);
    }
    for p in points {
        path.line_to(p);
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_cover_the_domain_in_order() {
        let samples = trend_samples(TREND_SAMPLES);
        assert_eq!(samples.len(), TREND_SAMPLES);
        assert_eq!(samples[0], Point::new(0.0, 1.0));
        assert!((samples[TREND_SAMPLES - 1].x - TREND_YEARS).abs() < 1e-12);
        for pair in samples.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!(pair[1].y > pair[0].y);
        }
    }

    #[test]
    fn tiny_sample_counts_clamp_to_a_two_point_curve() {
        for n in [0, 1, 2] {
            let samples = trend_samples(n);
            assert_eq!(samples.len(), 2);
            assert_eq!(samples[0].x, 0.0);
            assert!((samples[1].x - TREND_YEARS).abs() < 1e-12);
        }
    }

    #[test]
    fn baseline_is_convex_upward() {
        assert_eq!(baseline(0.0), 1.0);
        let early = baseline(1.0) - baseline(0.0);
        let late = baseline(5.0) - baseline(4.0);
        assert!(late > early);
    }

    #[test]
    fn band_is_closed_and_covers_both_edges() {
        let lower = trend_samples(5);
        let upper: Vec<Point> = lower.iter().map(|p| Point::new(p.x, p.y * 1.3)).collect();
        let path = band(&lower, &upper);
        let els: Vec<_> = path.elements().to_vec();
        assert_eq!(els.len(), 5 + 5 + 1);
        assert!(matches!(els.last(), Some(kurbo::PathEl::ClosePath)));
    }
}
