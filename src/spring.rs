//! Damped spring used for the settle animation.
//!
//! The spring is parameterised the way platform spring animations are: a
//! fixed duration and a damping ratio. The natural frequency is chosen so the
//! oscillation envelope has decayed to `epsilon` when the duration elapses,
//! at which point progress snaps to exactly 1.0.

/// Smallest damping ratio accepted; zero would never settle.
const MIN_DAMPING: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    duration: f64,
    damping_ratio: f64,
    omega: f64,
}

impl Spring {
    pub fn new(duration: f64, damping_ratio: f64, epsilon: f64) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        let damping_ratio = if damping_ratio.is_finite() {
            damping_ratio.clamp(MIN_DAMPING, 1.0)
        } else {
            1.0
        };
        let epsilon = if epsilon.is_finite() {
            epsilon.clamp(1e-6, 0.5)
        } else {
            1e-3
        };
        let omega = if duration > 0.0 {
            -epsilon.ln() / (damping_ratio * duration)
        } else {
            0.0
        };
        Self {
            duration,
            damping_ratio,
            omega,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        !(elapsed < self.duration)
    }

    /// Normalised progress at `elapsed` seconds. Starts at 0.0, may overshoot
    /// past 1.0 while underdamped, and is exactly 1.0 once finished.
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.is_finished(elapsed) {
            return 1.0;
        }
        if elapsed <= 0.0 {
            return 0.0;
        }

        let zeta = self.damping_ratio;
        let w = self.omega;
        let envelope = (-zeta * w * elapsed).exp();

        if zeta < 1.0 {
            let root = (1.0 - zeta * zeta).sqrt();
            let wd = w * root;
            1.0 - envelope * ((wd * elapsed).cos() + (zeta / root) * (wd * elapsed).sin())
        } else {
            1.0 - envelope * (1.0 + w * elapsed)
        }
    }

    /// Interpolate from `from` to `to` along the spring.
    pub fn sample(&self, from: f64, to: f64, elapsed: f64) -> f64 {
        from + (to - from) * self.progress(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_ends_at_one() {
        let s = Spring::new(0.7, 0.2, 0.001);
        assert_eq!(s.progress(0.0), 0.0);
        assert_eq!(s.progress(0.7), 1.0);
        assert_eq!(s.progress(5.0), 1.0);
        assert!(s.is_finished(0.7));
        assert!(!s.is_finished(0.69));
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let s = Spring::new(0.7, 0.2, 0.001);
        let peak = (1..70)
            .map(|i| s.progress(i as f64 * 0.01))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "expected overshoot, peak was {peak}");
    }

    #[test]
    fn critically_damped_spring_is_monotonic() {
        let s = Spring::new(1.0, 1.0, 0.001);
        let mut last = 0.0;
        for i in 1..=100 {
            let p = s.progress(i as f64 * 0.01);
            assert!(p >= last - 1e-12, "progress went backwards at step {i}");
            assert!(p <= 1.0 + 1e-12);
            last = p;
        }
    }

    #[test]
    fn envelope_is_nearly_settled_before_snap() {
        let s = Spring::new(0.7, 0.27, 0.001);
        let p = s.progress(0.699);
        assert!((p - 1.0).abs() < 0.01, "progress just before end was {p}");
    }

    #[test]
    fn degenerate_parameters_finish_immediately() {
        for s in [
            Spring::new(0.0, 0.2, 0.001),
            Spring::new(-1.0, 0.2, 0.001),
            Spring::new(f64::NAN, f64::NAN, f64::NAN),
        ] {
            assert!(s.is_finished(0.0));
            assert_eq!(s.sample(10.0, 20.0, 0.0), 20.0);
        }
    }

    #[test]
    fn never_produces_nan() {
        let s = Spring::new(0.5, 0.0, 0.0);
        for i in 0..60 {
            assert!(s.progress(i as f64 / 100.0).is_finite());
        }
        assert!(s.progress(f64::NAN).is_finite());
    }

    #[test]
    fn sample_interpolates() {
        let s = Spring::new(1.0, 0.5, 0.001);
        assert_eq!(s.sample(100.0, 300.0, 0.0), 100.0);
        assert_eq!(s.sample(100.0, 300.0, 1.0), 300.0);
    }
}
