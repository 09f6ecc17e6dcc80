#![warn(missing_docs)]
//! Macros that facilitate the creation of lengths in world units.
//!
//! One world unit of the ray diagram corresponds to one millimeter.

///macro to create a Length in millimeter
#[macro_export]
macro_rules! millimeter {
    ($x:expr) => {{
        use uom::si::{f64::Length, length::millimeter};
        Length::new::<millimeter>($x)
    }};
}

/// Returns the value of a `Length` in world units (millimeter).
#[must_use]
pub fn world_units(length: uom::si::f64::Length) -> f64 {
    length.get::<uom::si::length::millimeter>()
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    #[test]
    fn millimeter() {
        let length = millimeter!(150.0);
        assert_abs_diff_eq!(length.value, 0.15);
        assert_abs_diff_eq!(world_units(length), 150.0, epsilon = 1e-12);
    }
    #[test]
    fn negative() {
        assert_abs_diff_eq!(world_units(millimeter!(-20.0)), -20.0, epsilon = 1e-12);
    }
}
