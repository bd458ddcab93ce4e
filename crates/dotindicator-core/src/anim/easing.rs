//! Pure easing functions for indicator animations
//!
//! Maps a time fraction in [0, 1] to an eased fraction in [0, 1].

use std::f64::consts::PI;

pub use crate::config::EasingType;

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::AccelerateDecelerate => accelerate_decelerate(t),
        }
    }
}

/// Half-cosine ease: f(t) = cos((t + 1)π) / 2 + 0.5
#[inline]
fn accelerate_decelerate(t: f64) -> f64 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 2] = [EasingType::Linear, EasingType::AccelerateDecelerate];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-9, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_accelerate_decelerate_is_symmetric_and_flat_at_ends() {
        let ease = EasingType::AccelerateDecelerate;
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() < 1e-9);

        // Zero velocity at both ends: the first and last steps are much smaller
        // than the middle one.
        let h = 0.01;
        let start_step = ease.apply(h) - ease.apply(0.0);
        let mid_step = ease.apply(0.5 + h) - ease.apply(0.5);
        let end_step = ease.apply(1.0) - ease.apply(1.0 - h);
        assert!(start_step < mid_step / 50.0);
        assert!(end_step < mid_step / 50.0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(EasingType::Linear.apply(-1.0), 0.0);
        assert_eq!(EasingType::Linear.apply(2.0), 1.0);
    }
}
