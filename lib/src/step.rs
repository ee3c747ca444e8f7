use std::f64::consts::SQRT_2;

use strum::VariantArray;

use crate::location::Location;

/// The eight directions a decomposable segment can travel between
/// neighboring grid points.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
pub(crate) enum GridStep {
    UP,
    UPRIGHT,
    RIGHT,
    DOWNRIGHT,
    DOWN,
    DOWNLEFT,
    LEFT,
    UPLEFT,
}

impl GridStep {
    // (row, column) deltas; row 0 is the top of the grid
    pub(crate) fn offset(&self) -> (isize, isize) {
        match self {
            Self::UP => (-1, 0),
            Self::UPRIGHT => (-1, 1),
            Self::RIGHT => (0, 1),
            Self::DOWNRIGHT => (1, 1),
            Self::DOWN => (1, 0),
            Self::DOWNLEFT => (1, -1),
            Self::LEFT => (0, -1),
            Self::UPLEFT => (-1, -1),
        }
    }

    pub(crate) fn attempt_from(&self, location: Location) -> Location {
        location.offset_by(self.offset())
    }

    /// The direction of travel covering `delta`, if the delta is axis
    /// aligned or exactly diagonal. Any other delta (including zero) has
    /// no step direction and its segment cannot be walked cell by cell.
    pub(crate) fn toward(delta: (isize, isize)) -> Option<Self> {
        let (dr, dc) = delta;
        if (dr, dc) == (0, 0) || (dr != 0 && dc != 0 && dr.abs() != dc.abs()) {
            return None;
        }
        Self::VARIANTS
            .iter()
            .find(|dir| dir.offset() == (dr.signum(), dc.signum()))
            .copied()
    }

    /// Length of one step in this direction: 1 along an axis, root 2 on a
    /// diagonal.
    pub(crate) fn length(&self) -> f64 {
        let (dr, dc) = self.offset();
        if dr != 0 && dc != 0 {
            SQRT_2
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toward_axis_and_diagonal() {
        assert_eq!(GridStep::toward((0, 3)), Some(GridStep::RIGHT));
        assert_eq!(GridStep::toward((-2, 0)), Some(GridStep::UP));
        assert_eq!(GridStep::toward((3, -3)), Some(GridStep::DOWNLEFT));
        assert_eq!(GridStep::toward((-1, -1)), Some(GridStep::UPLEFT));
    }

    #[test]
    fn toward_rejects_unaligned_and_zero() {
        assert_eq!(GridStep::toward((0, 0)), None);
        assert_eq!(GridStep::toward((1, 2)), None);
        assert_eq!(GridStep::toward((2, 4)), None);
        assert_eq!(GridStep::toward((3, 4)), None);
    }

    #[test]
    fn step_lengths() {
        assert_eq!(GridStep::RIGHT.length(), 1.0);
        assert_eq!(GridStep::DOWN.length(), 1.0);
        assert_eq!(GridStep::UPRIGHT.length(), SQRT_2);
    }

    #[test]
    fn walking_a_step() {
        assert_eq!(GridStep::DOWNRIGHT.attempt_from(Location(1, 1)), Location(2, 2));
        assert_eq!(GridStep::UP.attempt_from(Location(3, 0)), Location(2, 0));
    }
}
