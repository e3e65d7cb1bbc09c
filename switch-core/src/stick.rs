//! Analog stick math: tilt ratios, axis scaling, and polar conversion.
//!
//! Stick deflection is expressed as a *tilt ratio*, a percentage from
//! -100 to 100 per axis. The wire format uses one unsigned byte per axis
//! with 128 as center.

use core::f32::consts::PI;

/// Axis wire value for full negative deflection (after symmetric scaling).
pub const AXIS_MIN: u8 = 1;

/// Axis wire value for a centered stick.
pub const AXIS_CENTER: u8 = 128;

/// Axis wire value for full positive deflection.
pub const AXIS_MAX: u8 = 255;

/// Maximum tilt ratio magnitude (percent).
pub const TILT_MAX: i8 = 100;

/// Convert a tilt ratio (-100..=100 percent) to an axis wire byte.
///
/// The mapping is center-symmetric: +-100% deflects 127 counts from the
/// 128 center. Out-of-range input saturates.
#[inline]
#[must_use]
pub fn tilt_to_axis(percent: i8) -> u8 {
    let p = (percent as i32).clamp(-(TILT_MAX as i32), TILT_MAX as i32);
    (AXIS_CENTER as i32 + p * 127 / 100) as u8
}

/// Convert a polar stick intent (direction in degrees, power 0.0..=1.0)
/// to a tilt ratio pair.
///
/// 0 degrees is stick-up and angles run clockwise, so 90 degrees is
/// stick-right. Results are truncated toward zero and saturate at
/// +-100%.
#[must_use]
pub fn polar_to_tilt(direction_deg: i32, power: f32) -> (i8, i8) {
    let rad = direction_deg as f32 * PI / 180.0;
    let x = libm::sinf(rad) * power * 100.0;
    let y = -libm::cosf(rad) * power * 100.0;
    (saturate_tilt(x), saturate_tilt(y))
}

#[inline]
fn saturate_tilt(value: f32) -> i8 {
    value.clamp(-(TILT_MAX as f32), TILT_MAX as f32) as i8
}

/// Cardinal stick direction for full-deflection flicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StickDirection {
    Up,
    Down,
    Left,
    Right,
}

impl StickDirection {
    /// Full-deflection tilt ratio pair for this direction.
    ///
    /// Up is negative Y on the wire (axis byte below center).
    #[must_use]
    pub const fn tilt(self) -> (i8, i8) {
        match self {
            StickDirection::Up => (0, -100),
            StickDirection::Down => (0, 100),
            StickDirection::Left => (-100, 0),
            StickDirection::Right => (100, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_to_axis_center() {
        assert_eq!(tilt_to_axis(0), AXIS_CENTER);
    }

    #[test]
    fn test_tilt_to_axis_extremes() {
        assert_eq!(tilt_to_axis(100), AXIS_MAX);
        assert_eq!(tilt_to_axis(-100), AXIS_MIN);
    }

    #[test]
    fn test_tilt_to_axis_saturates() {
        assert_eq!(tilt_to_axis(i8::MAX), AXIS_MAX);
        assert_eq!(tilt_to_axis(i8::MIN), AXIS_MIN);
    }

    #[test]
    fn test_polar_cardinals() {
        assert_eq!(polar_to_tilt(0, 1.0), (0, -100));
        assert_eq!(polar_to_tilt(90, 1.0), (100, 0));
        assert_eq!(polar_to_tilt(180, 1.0), (0, 100));
        assert_eq!(polar_to_tilt(270, 1.0), (-100, 0));
        assert_eq!(polar_to_tilt(360, 1.0), (0, -100));
    }

    #[test]
    fn test_polar_diagonal_truncates() {
        // sin(45 deg) ~= 0.7071 -> 70 after truncation toward zero
        assert_eq!(polar_to_tilt(45, 1.0), (70, -70));
    }

    #[test]
    fn test_polar_power_scales() {
        assert_eq!(polar_to_tilt(90, 0.5), (50, 0));
        assert_eq!(polar_to_tilt(90, 0.0), (0, 0));
    }

    #[test]
    fn test_stick_direction_tilt() {
        assert_eq!(StickDirection::Up.tilt(), (0, -100));
        assert_eq!(StickDirection::Down.tilt(), (0, 100));
        assert_eq!(StickDirection::Left.tilt(), (-100, 0));
        assert_eq!(StickDirection::Right.tilt(), (100, 0));
    }
}
