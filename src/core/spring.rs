//! Damped spring that turns jumpy scroll targets into fluid motion.
//!
//! Position, velocity and target live together in one small value type owned
//! by the carousel.  Each frame the host calls [`Spring::update`] with the
//! latest target and the elapsed time; the spring integrates toward it and
//! reports where it is now.
//!
//! Integration is semi-implicit Euler with a maximum substep derived from the
//! spring's own response rate, so the result depends only on the sequence of
//! `(target, dt)` pairs, never on wall-clock time, and stays stable for any
//! frame rate the host manages.

use super::error::CarouselError;

/// Largest integration step.  Frames longer than this are subdivided.
const MAX_SUBSTEP: f64 = 1.0 / 120.0;

/// Longest frame the spring will integrate in one call (seconds).
/// A host that stalls for seconds resumes as if one slow frame passed.
const MAX_FRAME_DT: f64 = 0.1;

/// Upper bound on substeps for a single call.
const MAX_SUBSTEPS: f64 = 4096.0;

/// Fastest response rate ([`SpringConfig::response_rate`]) that can be
/// integrated stably within [`MAX_SUBSTEPS`] over [`MAX_FRAME_DT`].
const MAX_RESPONSE_RATE: f64 = MAX_SUBSTEPS / MAX_FRAME_DT;

/// Spring parameters.  Immutable once the carousel is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from the target below which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 120.0,
            damping: 25.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// Reject parameters that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), CarouselError> {
        positive("stiffness", self.stiffness)?;
        positive("mass", self.mass)?;
        non_negative("damping", self.damping)?;
        non_negative("rest_delta", self.rest_delta)?;
        non_negative("rest_speed", self.rest_speed)?;
        let rate = self.response_rate();
        if rate > MAX_RESPONSE_RATE {
            return Err(CarouselError::Spring {
                field: "response rate (damping/mass + sqrt(stiffness/mass))",
                requirement: "at most 40960 per second",
                value: rate,
            });
        }
        Ok(())
    }

    /// c/m + √(k/m), in 1/s.  A substep no longer than its reciprocal keeps
    /// semi-implicit Euler stable for both the damping and the oscillation.
    pub fn response_rate(&self) -> f64 {
        self.damping / self.mass + (self.stiffness / self.mass).sqrt()
    }

    fn max_substep(&self) -> f64 {
        let rate = self.response_rate();
        if rate.is_finite() && rate > 0.0 {
            MAX_SUBSTEP.min(1.0 / rate)
        } else {
            MAX_SUBSTEP
        }
    }

    /// ζ = c / (2·√(k·m)).  1.0 is critical; the defaults sit slightly above.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), CarouselError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CarouselError::Spring {
            field,
            requirement: "positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), CarouselError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CarouselError::Spring {
            field,
            requirement: "non-negative",
            value,
        })
    }
}

/// A one-dimensional damped spring.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    resting: bool,
}

impl Spring {
    /// A spring sitting at rest on `initial`.
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            position: initial,
            velocity: 0.0,
            target: initial,
            resting: true,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// True once the spring has settled and stopped integrating.
    pub fn is_resting(&self) -> bool {
        self.resting
    }

    /// Advance one frame toward `target` and return the new position.
    ///
    /// Calling this repeatedly with an unchanged target is harmless; once the
    /// spring rests it returns the target without doing any work.
    /// Non-finite targets are ignored and non-finite `dt` counts as zero.
    pub fn update(&mut self, target: f64, dt: f64) -> f64 {
        if target.is_finite() && target != self.target {
            self.target = target;
            self.resting = false;
        }
        if self.resting {
            return self.position;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        let steps = (dt / self.config.max_substep())
            .ceil()
            .clamp(1.0, MAX_SUBSTEPS);
        let h = dt / steps;
        for _ in 0..steps as u32 {
            let acceleration = (self.config.stiffness * (self.target - self.position)
                - self.config.damping * self.velocity)
                / self.config.mass;
            self.velocity += acceleration * h;
            self.position += self.velocity * h;
        }

        if (self.target - self.position).abs() <= self.config.rest_delta
            && self.velocity.abs() <= self.config.rest_speed
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.resting = true;
        }
        self.position
    }

    /// Move position and target by the same `shift`, keeping velocity.
    ///
    /// The remaining travel is unchanged, so only the frame of reference
    /// moves.  Used to trade whole turns of a modular index for nothing.
    pub fn rebase(&mut self, shift: f64) {
        if shift.is_finite() {
            self.position += shift;
            self.target += shift;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn frames_to_rest(spring: &mut Spring, target: f64) -> usize {
        let mut frames = 0;
        loop {
            spring.update(target, FRAME);
            frames += 1;
            if spring.is_resting() {
                return frames;
            }
            assert!(frames < 10_000, "spring never settled");
        }
    }

    #[test]
    fn default_config_matches_hero_tuning() {
        let c = SpringConfig::default();
        assert_eq!((c.stiffness, c.damping, c.rest_delta), (120.0, 25.0, 0.001));
        assert!(c.damping_ratio() > 1.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn settles_on_held_target_in_fixed_frame_count() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        assert_eq!(frames_to_rest(&mut spring, 7.0), 90);
        assert_eq!(spring.position(), 7.0);
        assert_eq!(spring.velocity, 0.0);
    }

    #[test]
    fn settles_at_other_frame_rates_and_distances() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        assert_eq!(frames_to_rest(&mut spring, 70.0), 112);

        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        let mut frames = 0;
        while !spring.is_resting() || frames == 0 {
            spring.update(7.0, 1.0 / 120.0);
            frames += 1;
        }
        assert_eq!(frames, 179);
    }

    #[test]
    fn never_overshoots_with_default_tuning() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        for _ in 0..300 {
            let p = spring.update(7.0, FRAME);
            assert!(p <= 7.0);
        }
    }

    #[test]
    fn moves_monotonically_toward_target() {
        let mut spring = Spring::new(SpringConfig::default(), 10.0);
        let mut last = 10.0;
        for _ in 0..120 {
            let p = spring.update(3.0, FRAME);
            assert!(p <= last);
            last = p;
        }
    }

    #[test]
    fn resting_spring_ignores_repeated_updates() {
        let mut spring = Spring::new(SpringConfig::default(), 5.0);
        for _ in 0..10 {
            assert_eq!(spring.update(5.0, FRAME), 5.0);
        }
        assert!(spring.is_resting());
    }

    #[test]
    fn moving_target_is_tracked_with_bounded_lag() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        let mut worst: f64 = 0.0;
        for f in 1..=600 {
            let target = f as f64 * 0.05;
            let p = spring.update(target, FRAME);
            if f > 60 {
                worst = worst.max((target - p).abs());
            }
        }
        // Steady-state lag for a ramp is v·c/k ≈ 3·25/120.
        assert!(worst < 0.7, "lag {worst}");
    }

    #[test]
    fn long_stall_is_clamped_to_one_slow_frame() {
        let mut a = Spring::new(SpringConfig::default(), 0.0);
        let mut b = a.clone();
        a.update(7.0, 30.0);
        b.update(7.0, 0.1);
        assert_eq!(a, b);
        assert!(a.position().is_finite());
    }

    #[test]
    fn non_finite_inputs_are_ignored() {
        let mut spring = Spring::new(SpringConfig::default(), 1.0);
        spring.update(f64::NAN, FRAME);
        spring.update(f64::INFINITY, f64::NAN);
        assert_eq!(spring.position(), 1.0);
        assert!(spring.is_resting());
    }

    #[test]
    fn rebase_keeps_remaining_travel() {
        let mut shifted = Spring::new(SpringConfig::default(), 0.0);
        let mut plain = shifted.clone();
        shifted.update(40.0, FRAME);
        plain.update(40.0, FRAME);

        shifted.rebase(-35.0);
        assert_eq!(shifted.position(), plain.position() - 35.0);
        assert_eq!(shifted.velocity, plain.velocity);

        for _ in 0..30 {
            shifted.update(5.0, FRAME);
            plain.update(40.0, FRAME);
            assert!((shifted.position() + 35.0 - plain.position()).abs() < 1e-9);
        }
        assert!(!shifted.is_resting());

        let mut resting = Spring::new(SpringConfig::default(), 3.0);
        resting.rebase(7.0);
        assert_eq!(resting.position(), 10.0);
        resting.update(10.0, FRAME);
        assert!(resting.is_resting());
    }

    #[test]
    fn accepted_configs_stay_bounded() {
        let stiffness = [1.0, 120.0, 2_000.0, 20_000.0, 1e6];
        let damping = [0.0, 5.0, 25.0, 400.0, 1_000.0, 10_000.0];
        let mass = [0.01, 0.1, 1.0, 10.0];
        let mut accepted = 0;
        for &k in &stiffness {
            for &c in &damping {
                for &m in &mass {
                    let config = SpringConfig {
                        stiffness: k,
                        damping: c,
                        mass: m,
                        ..SpringConfig::default()
                    };
                    if config.validate().is_err() {
                        continue;
                    }
                    accepted += 1;
                    for dt in [1.0 / 240.0, FRAME, 0.05, 1.0] {
                        let mut spring = Spring::new(config, 0.0);
                        for _ in 0..240 {
                            let p = spring.update(7.0, dt);
                            assert!(
                                p.is_finite() && (p - 7.0).abs() <= 14.0,
                                "k={k} c={c} m={m} dt={dt} diverged to {p}"
                            );
                        }
                    }
                }
            }
        }
        assert!(accepted > 90, "only {accepted} configs accepted");
    }

    #[test]
    fn heavy_damping_creeps_without_overshoot() {
        let config = SpringConfig {
            damping: 1_000.0,
            ..SpringConfig::default()
        };
        assert!(config.validate().is_ok());
        let mut spring = Spring::new(config, 0.0);
        let mut last = 0.0;
        for _ in 0..120 {
            let p = spring.update(7.0, FRAME);
            assert!(p >= last && p <= 7.0, "moved from {last} to {p}");
            last = p;
        }
        assert!(last > 0.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut c = SpringConfig::default();
        c.stiffness = 0.0;
        assert!(matches!(
            c.validate(),
            Err(CarouselError::Spring { field: "stiffness", .. })
        ));
        let mut c = SpringConfig::default();
        c.damping = f64::NAN;
        assert!(c.validate().is_err());
        let c = SpringConfig {
            damping: 1_000.0,
            mass: 0.01,
            ..SpringConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(CarouselError::Spring { requirement: "at most 40960 per second", .. })
        ));
        let mut c = SpringConfig::default();
        c.rest_delta = -1.0;
        assert!(c.validate().is_err());
    }
}
