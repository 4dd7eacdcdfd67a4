//! Time-based interpolation for hover fades and the gauge needle.
//!
//! Nothing here owns a clock. Callers pass elapsed milliseconds and sample the value, which keeps
//! headless rendering deterministic.

use serde::{Deserialize, Serialize};

pub const HOVER_MS: f64 = 300.0;
pub const EVIDENCE_HOVER_MS: f64 = 200.0;
pub const LEVEL_FADE_MS: f64 = 200.0;
pub const NEEDLE_MS: f64 = 800.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t * t * t / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * t + 2.0) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: Easing::default(),
        }
    }

    pub fn value_at(&self, t_ms: f64) -> f64 {
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            t_ms / self.duration_ms
        };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_done(&self, t_ms: f64) -> bool {
        t_ms >= self.duration_ms
    }
}

/// Damped harmonic oscillator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}

impl Spring {
    /// Offset from the rest position and velocity after `t` seconds, starting at offset `d`
    /// with velocity `v0`.
    pub fn state_at(&self, d: f64, v0: f64, t: f64) -> (f64, f64) {
        let mass = if self.mass > 0.0 { self.mass } else { 1.0 };
        let omega = (self.stiffness.max(0.0) / mass).sqrt();
        if omega == 0.0 {
            return (d + v0 * t, v0);
        }
        let zeta = self.damping / (2.0 * (self.stiffness * mass).sqrt());

        if zeta < 1.0 {
            let a = zeta * omega;
            let w = omega * (1.0 - zeta * zeta).sqrt();
            let b = (v0 + a * d) / w;
            let decay = (-a * t).exp();
            let (sin, cos) = (w * t).sin_cos();
            let x = decay * (d * cos + b * sin);
            let v = decay * ((b * w - a * d) * cos - (a * b + d * w) * sin);
            (x, v)
        } else if zeta == 1.0 {
            let c = v0 + omega * d;
            let decay = (-omega * t).exp();
            (decay * (d + c * t), decay * (c - omega * (d + c * t)))
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let a = (v0 - r2 * d) / (r1 - r2);
            let b = d - a;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (a * e1 + b * e2, a * r1 * e1 + b * r2 * e2)
        }
    }

    /// Value of a spring released at rest from `from` toward `to`, `t_ms` later.
    pub fn value_at(&self, from: f64, to: f64, t_ms: f64) -> f64 {
        to + self.state_at(from - to, 0.0, t_ms.max(0.0) / 1000.0).0
    }
}

/// A running spring that can be retargeted mid-flight without a jump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringAnimation {
    pub spring: Spring,
    pub from: f64,
    pub to: f64,
    pub velocity: f64,
    pub start_ms: f64,
}

impl SpringAnimation {
    pub fn new(spring: Spring, from: f64, to: f64, start_ms: f64) -> Self {
        Self {
            spring,
            from,
            to,
            velocity: 0.0,
            start_ms,
        }
    }

    fn state(&self, now_ms: f64) -> (f64, f64) {
        let t = (now_ms - self.start_ms).max(0.0) / 1000.0;
        let (x, v) = self.spring.state_at(self.from - self.to, self.velocity, t);
        (self.to + x, v)
    }

    pub fn value_at(&self, now_ms: f64) -> f64 {
        self.state(now_ms).0
    }

    /// Restarts toward `to` from wherever the spring is at `now_ms`, keeping its velocity.
    pub fn retarget(&mut self, now_ms: f64, to: f64) {
        if to == self.to {
            return;
        }
        let (value, velocity) = self.state(now_ms);
        self.from = value;
        self.velocity = velocity;
        self.to = to;
        self.start_ms = now_ms;
    }

    pub fn is_settled(&self, now_ms: f64, epsilon: f64) -> bool {
        let (x, v) = self.state(now_ms);
        (x - self.to).abs() < epsilon && v.abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_in_out_is_symmetric() {
        let e = Easing::CubicInOut;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.5), 0.5);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tween_clamps_past_its_duration() {
        let t = Tween::new(1.0, 3.0, HOVER_MS);
        assert_eq!(t.value_at(-10.0), 1.0);
        assert_eq!(t.value_at(1000.0), 3.0);
        assert!(t.is_done(HOVER_MS));
    }

    #[test]
    fn spring_starts_at_rest_and_converges() {
        let s = Spring::default();
        assert_eq!(s.value_at(180.0, 315.0, 0.0), 180.0);
        assert!((s.value_at(180.0, 315.0, 3000.0) - 315.0).abs() < 1e-3);
    }

    #[test]
    fn critically_and_over_damped_springs_converge() {
        for damping in [20.0, 40.0] {
            let s = Spring {
                damping,
                ..Spring::default()
            };
            assert!((s.value_at(0.0, 1.0, 10_000.0) - 1.0).abs() < 1e-6, "damping {damping}");
        }
    }

    #[test]
    fn retarget_is_continuous() {
        let mut anim = SpringAnimation::new(Spring::default(), 180.0, 360.0, 0.0);
        let before = anim.value_at(200.0);
        anim.retarget(200.0, 270.0);
        assert!((anim.value_at(200.0) - before).abs() < 1e-9);
        assert!(anim.is_settled(5000.0, 1e-3));
        assert!((anim.value_at(5000.0) - 270.0).abs() < 1e-3);
    }
}
