//! Sun oscillator
//!
//! Sweeps one coordinate back and forth between two bounds by a fixed step.
//! Bounds are detected with inclusive comparisons and the result is clamped,
//! so a step that does not divide the range evenly still turns around.

use crate::config::LightCycleConfig;

/// Bounded scalar oscillator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightCycle {
    min: f32,
    max: f32,
    step: f32,
    sign: f32,
}

impl LightCycle {
    /// Oscillator moving toward `max` first
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            step: step.abs(),
            sign: 1.0,
        }
    }

    /// Build from the light cycle configuration
    pub fn from_config(config: &LightCycleConfig) -> Self {
        Self::new(config.min, config.max, config.step)
    }

    /// Lower bound
    pub const fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// `+1.0` while moving toward `max`, `-1.0` toward `min`
    pub const fn sign(&self) -> f32 {
        self.sign
    }

    /// Move `coordinate` one step and return the new value.
    ///
    /// A coordinate already outside the bounds is pulled back onto the
    /// nearest one.
    pub fn advance(&mut self, coordinate: f32) -> f32 {
        let base = if coordinate.is_finite() {
            coordinate.clamp(self.min, self.max)
        } else {
            self.min
        };
        let next = base + self.sign * self.step;

        if next >= self.max {
            self.sign = -1.0;
            log::trace!("Light cycle turned at max {}", self.max);
            self.max
        } else if next <= self.min {
            self.sign = 1.0;
            log::trace!("Light cycle turned at min {}", self.min);
            self.min
        } else {
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stays_in_bounds() {
        let mut cycle = LightCycle::new(-100.0, 100.0, 0.5);
        let mut x = -69.0;
        for _ in 0..10_000 {
            x = cycle.advance(x);
            assert!((-100.0..=100.0).contains(&x));
        }
    }

    #[test]
    fn test_reverses_at_bounds() {
        let mut cycle = LightCycle::new(0.0, 2.0, 1.0);
        let mut x = 0.0;
        let mut trace = Vec::new();
        for _ in 0..6 {
            x = cycle.advance(x);
            trace.push(x);
        }
        assert_eq!(trace, vec![1.0, 2.0, 1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_uneven_step_never_sticks() {
        // 0.3 does not divide the range, so exact equality would never fire
        let mut cycle = LightCycle::new(-1.0, 1.0, 0.3);
        let mut x = 0.0;
        let mut turns = 0;
        let mut last_sign = cycle.sign();
        for _ in 0..100 {
            x = cycle.advance(x);
            assert!((-1.0..=1.0).contains(&x));
            if cycle.sign() != last_sign {
                turns += 1;
                last_sign = cycle.sign();
                assert!(x == 1.0 || x == -1.0);
            }
        }
        assert!(turns >= 10);
    }

    #[test]
    fn test_out_of_range_input_is_pulled_back() {
        let mut cycle = LightCycle::new(-100.0, 100.0, 0.5);
        assert_relative_eq!(cycle.advance(250.0), 100.0);
        assert_relative_eq!(cycle.sign(), -1.0);
        // Non-finite input restarts from the lower bound
        assert_relative_eq!(cycle.advance(f32::NAN), -100.0);
        assert_relative_eq!(cycle.sign(), 1.0);
    }

    #[test]
    fn test_from_config() {
        let cycle = LightCycle::from_config(&LightCycleConfig::default());
        assert_relative_eq!(cycle.min(), -100.0);
        assert_relative_eq!(cycle.max(), 100.0);
        assert_relative_eq!(cycle.sign(), 1.0);
    }
}
