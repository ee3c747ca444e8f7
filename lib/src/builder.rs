use crate::figure::Figure;
use crate::location::Location;
use crate::step::GridStep;

/// Builds a [`Figure`] by expanding drawn segments into graph edges.
///
/// Each segment is classified by its endpoint deltas, in priority order:
///
/// 1. Horizontal, vertical, or exactly diagonal segments decompose into
///    unit steps (length 1 on an axis, root 2 on a diagonal), one edge per
///    pair of consecutive grid cells crossed.
/// 2. Long knight shapes, with deltas of (2, 4) or (4, 2) in magnitude,
///    pass through the integer midpoint cell, producing two edges of
///    root 5.
/// 3. Anything else becomes a single direct edge of Euclidean length.
///
/// Zero-length segments are absorbed without drawing anything.
#[derive(Default)]
pub struct FigureBuilder {
    figure: Figure,
}

impl FigureBuilder {
    /// A builder holding a blank figure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one segment between two grid points. Chainable.
    pub fn segment(&mut self, from: Location, to: Location) -> &mut Self {
        let delta = from.delta_to(to);
        if delta == (0, 0) {
            return self;
        }

        if let Some(step) = GridStep::toward(delta) {
            let dist = step.length();
            let mut at = from;
            while at != to {
                let next = step.attempt_from(at);
                self.figure.link(at, next, dist);
                at = next;
            }
        } else if is_long_knight(delta) {
            // both deltas are even here, so the midpoint lands on a cell
            let mid = Location((from.0 + to.0) / 2, (from.1 + to.1) / 2);
            let dist = 5.0_f64.sqrt();
            self.figure.link(from, mid, dist);
            self.figure.link(to, mid, dist);
        } else {
            let (dr, dc) = delta;
            self.figure.link(from, to, ((dr * dr + dc * dc) as f64).sqrt());
        }

        self
    }

    /// Hand over the finished figure.
    pub fn finish(self) -> Figure {
        self.figure
    }
}

fn is_long_knight(delta: (isize, isize)) -> bool {
    let magnitudes = (delta.0.abs(), delta.1.abs());
    magnitudes == (2, 4) || magnitudes == (4, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(label: &str) -> Location {
        let mut chars = label.chars();
        Location::from_label_chars(chars.next().unwrap(), chars.next().unwrap()).unwrap()
    }

    #[test]
    fn axis_segment_decomposes_into_unit_steps() {
        let mut builder = FigureBuilder::new();
        builder.segment(at("A1"), at("A4"));
        let figure = builder.finish();
        assert_eq!(figure.vertex_count(), 4);
        assert!((figure.drawn_length() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn diagonal_segment_decomposes_at_root_two() {
        let mut builder = FigureBuilder::new();
        builder.segment(at("E5"), at("C3"));
        let figure = builder.finish();
        assert_eq!(figure.vertex_count(), 3);
        assert!((figure.drawn_length() - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn long_knight_passes_through_midpoint() {
        let mut builder = FigureBuilder::new();
        builder.segment(at("A1"), at("C5"));
        let figure = builder.finish();
        // A1 and C5 plus the synthesized B3
        assert_eq!(figure.vertex_count(), 3);
        assert!((figure.drawn_length() - 2.0 * 5.0_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn short_knight_is_a_direct_edge() {
        let mut builder = FigureBuilder::new();
        builder.segment(at("A1"), at("B3"));
        let figure = builder.finish();
        assert_eq!(figure.vertex_count(), 2);
        assert!((figure.drawn_length() - 5.0_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn irregular_segment_is_a_direct_edge() {
        let mut builder = FigureBuilder::new();
        builder.segment(at("A1"), at("B5"));
        let figure = builder.finish();
        assert_eq!(figure.vertex_count(), 2);
        assert!((figure.drawn_length() - 17.0_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn degenerate_segment_is_absorbed() {
        let mut builder = FigureBuilder::new();
        builder.segment(at("C3"), at("C3"));
        let figure = builder.finish();
        assert_eq!(figure.vertex_count(), 0);
        assert_eq!(figure.drawn_length(), 0.0);
    }

    #[test]
    fn duplicate_segment_draws_nothing_new() {
        let mut builder = FigureBuilder::new();
        builder.segment(at("A1"), at("A2")).segment(at("A2"), at("A1"));
        let figure = builder.finish();
        assert_eq!(figure.vertex_count(), 2);
        assert!((figure.drawn_length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn overlapping_collinear_segments_dedup_per_unit_step() {
        let mut builder = FigureBuilder::new();
        builder.segment(at("A1"), at("A3")).segment(at("A2"), at("A4"));
        let figure = builder.finish();
        assert_eq!(figure.vertex_count(), 4);
        assert!((figure.drawn_length() - 3.0).abs() < 1e-6);
    }
}
