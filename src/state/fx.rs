//! Particle state for the two heart effects: the single floating heart
//! spawned above the NO button, and the screen-wide heart shower played
//! when the user lands on the affirmative panel.
//!
//! All timestamps are `performance.now()` milliseconds. The FX canvas
//! steps this state once per animation frame; everything here is plain
//! math so it can be exercised off-browser.

use crate::model::Settings;

/// Lifetime of a floating heart.
pub const FLOAT_LIFETIME_MS: f64 = 760.0;
/// How far a floating heart rises over its lifetime.
pub const FLOAT_RISE_PX: f64 = 120.0;
/// Fraction of the lifetime spent fading/scaling in.
pub const FLOAT_RAMP: f64 = 0.18;
/// Hard cap on simultaneously falling hearts.
pub const MAX_DROPS: usize = 120;

fn rand01() -> f64 {
    js_sys::Math::random()
}

/// Ease-out cubic, stand-in for the original spring-ish curve.
pub fn ease_out_cubic(t: f64) -> f64 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

/// One heart rising from the NO button.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatHeart {
    /// Spawn point in viewport pixels.
    pub x: f64,
    pub y: f64,
    /// Total horizontal drift over the lifetime.
    pub drift_px: f64,
    pub spawned_at: f64,
}

impl FloatHeart {
    pub fn age_frac(&self, now: f64) -> f64 {
        ((now - self.spawned_at) / FLOAT_LIFETIME_MS).clamp(0.0, 1.0)
    }

    pub fn done(&self, now: f64) -> bool {
        now - self.spawned_at >= FLOAT_LIFETIME_MS
    }

    /// Ramps in quickly, then fades out over the rest of the life.
    pub fn alpha(&self, now: f64) -> f64 {
        let t = self.age_frac(now);
        if t < FLOAT_RAMP {
            t / FLOAT_RAMP
        } else {
            1.0 - (t - FLOAT_RAMP) / (1.0 - FLOAT_RAMP)
        }
    }

    /// Swells 0.78 -> 1.10 on the ramp, then settles towards 1.14.
    pub fn scale(&self, now: f64) -> f64 {
        let t = self.age_frac(now);
        if t < FLOAT_RAMP {
            0.78 + (1.10 - 0.78) * (t / FLOAT_RAMP)
        } else {
            1.10 + (1.14 - 1.10) * ((t - FLOAT_RAMP) / (1.0 - FLOAT_RAMP))
        }
    }

    pub fn pos(&self, now: f64) -> (f64, f64) {
        let e = ease_out_cubic(self.age_frac(now));
        (self.x + self.drift_px * e, self.y - FLOAT_RISE_PX * e)
    }
}

/// One heart falling during the shower.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartDrop {
    /// Spawn column in viewport pixels.
    pub x: f64,
    /// Glyph size (also used as the off-screen margin).
    pub size_px: f64,
    /// Total horizontal drift over the fall.
    pub drift_px: f64,
    /// Total rotation over the fall, degrees.
    pub rot_deg: f64,
    pub fall_ms: f64,
    pub spawned_at: f64,
}

impl HeartDrop {
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.spawned_at) / self.fall_ms).clamp(0.0, 1.0)
    }

    pub fn done(&self, now: f64) -> bool {
        now - self.spawned_at >= self.fall_ms
    }

    /// Linear fall from just above the viewport to just below it.
    pub fn pos(&self, now: f64, viewport_h: f64) -> (f64, f64) {
        let t = self.progress(now);
        (
            self.x + self.drift_px * t,
            -self.size_px + (viewport_h + 2.0 * self.size_px) * t,
        )
    }

    pub fn rotation_deg(&self, now: f64) -> f64 {
        self.rot_deg * self.progress(now)
    }
}

/// Active shower spawner; cleared once `ends_at` passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Shower {
    pub ends_at: f64,
    pub last_spawn: f64,
    pub spawn_every_ms: f64,
}

#[derive(Debug, Default)]
pub struct FxState {
    pub floats: Vec<FloatHeart>,
    pub drops: Vec<HeartDrop>,
    pub shower: Option<Shower>,
    pub settings: Settings,
}

impl FxState {
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if settings.reduce_motion {
            self.floats.clear();
            self.drops.clear();
            self.shower = None;
        }
    }

    /// Spawn a floating heart at a viewport point (NO button center-top).
    pub fn spawn_float(&mut self, x: f64, y: f64, now: f64) {
        if self.settings.reduce_motion {
            return;
        }
        self.floats.push(FloatHeart {
            x,
            y,
            drift_px: (rand01() - 0.5) * 18.0,
            spawned_at: now,
        });
    }

    /// Begin a heart shower lasting `duration_ms`; restarting extends it.
    pub fn start_shower(&mut self, now: f64, duration_ms: f64) {
        if self.settings.reduce_motion {
            return;
        }
        self.shower = Some(Shower {
            ends_at: now + duration_ms,
            // First tick spawns immediately.
            last_spawn: now - self.settings.density.spawn_every_ms(),
            spawn_every_ms: self.settings.density.spawn_every_ms(),
        });
    }

    /// Advance the simulation one frame.
    pub fn step(&mut self, now: f64, viewport_w: f64) {
        self.step_with(now, viewport_w, &mut rand01);
    }

    /// Same as [`step`](Self::step) with the randomness injected.
    pub fn step_with(&mut self, now: f64, viewport_w: f64, rng: &mut impl FnMut() -> f64) {
        self.floats.retain(|f| !f.done(now));
        self.drops.retain(|d| !d.done(now));

        let Some(shower) = &mut self.shower else {
            return;
        };
        if now >= shower.ends_at {
            self.shower = None;
            return;
        }
        if now - shower.last_spawn >= shower.spawn_every_ms {
            shower.last_spawn = now;
            Self::spawn_drop(&mut self.drops, now, viewport_w, &mut *rng);
            if rng() > 0.6 {
                Self::spawn_drop(&mut self.drops, now, viewport_w, &mut *rng);
            }
        }
    }

    fn spawn_drop(
        drops: &mut Vec<HeartDrop>,
        now: f64,
        viewport_w: f64,
        rng: &mut impl FnMut() -> f64,
    ) {
        if drops.len() >= MAX_DROPS {
            return;
        }
        drops.push(HeartDrop {
            x: rng() * viewport_w,
            size_px: 16.0 + rng() * 18.0,
            drift_px: (rng() - 0.5) * 120.0,
            rot_deg: rng() * 240.0 - 120.0,
            fall_ms: 2600.0 + rng() * 1900.0,
            spawned_at: now,
        });
    }

    /// True when nothing needs another frame.
    pub fn is_idle(&self) -> bool {
        self.floats.is_empty() && self.drops.is_empty() && self.shower.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Density;

    fn float_at(spawned_at: f64) -> FloatHeart {
        FloatHeart {
            x: 200.0,
            y: 300.0,
            drift_px: 9.0,
            spawned_at,
        }
    }

    fn drop_at(spawned_at: f64) -> HeartDrop {
        HeartDrop {
            x: 100.0,
            size_px: 20.0,
            drift_px: -60.0,
            rot_deg: 120.0,
            fall_ms: 3000.0,
            spawned_at,
        }
    }

    #[test]
    fn ease_out_cubic_is_bounded_and_monotone() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=10 {
            let v = ease_out_cubic(i as f64 / 10.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn float_heart_alpha_envelope() {
        let f = float_at(1000.0);
        assert_eq!(f.alpha(1000.0), 0.0);
        let peak = f.alpha(1000.0 + FLOAT_RAMP * FLOAT_LIFETIME_MS);
        assert!((peak - 1.0).abs() < 1e-9);
        for i in 0..=20 {
            let now = 1000.0 + FLOAT_LIFETIME_MS * i as f64 / 20.0;
            let a = f.alpha(now);
            assert!((0.0..=1.0).contains(&a), "alpha {a} out of range");
        }
        assert!(f.alpha(1000.0 + FLOAT_LIFETIME_MS) < 1e-9);
    }

    #[test]
    fn float_heart_rises_and_retires() {
        let f = float_at(0.0);
        let (x0, y0) = f.pos(0.0);
        let (x1, y1) = f.pos(FLOAT_LIFETIME_MS);
        assert_eq!((x0, y0), (200.0, 300.0));
        assert!((y0 - y1 - FLOAT_RISE_PX).abs() < 1e-9);
        assert!((x1 - x0 - 9.0).abs() < 1e-9);
        assert!(!f.done(FLOAT_LIFETIME_MS - 1.0));
        assert!(f.done(FLOAT_LIFETIME_MS));
    }

    #[test]
    fn drop_falls_across_the_viewport() {
        let d = drop_at(0.0);
        let h = 600.0;
        let (_, y0) = d.pos(0.0, h);
        let (x1, y1) = d.pos(3000.0, h);
        assert_eq!(y0, -20.0);
        assert_eq!(y1, h + 20.0);
        assert_eq!(x1, 40.0);
        assert_eq!(d.rotation_deg(1500.0), 60.0);
        assert!(d.done(3000.0));
    }

    #[test]
    fn step_retires_expired_particles() {
        let mut fx = FxState::default();
        fx.floats.push(float_at(0.0));
        fx.floats.push(float_at(500.0));
        fx.drops.push(drop_at(0.0));
        fx.step_with(FLOAT_LIFETIME_MS, 800.0, &mut || 0.5);
        assert_eq!(fx.floats.len(), 1);
        assert_eq!(fx.drops.len(), 1);
        fx.step_with(3000.0, 800.0, &mut || 0.5);
        assert!(fx.drops.is_empty());
    }

    #[test]
    fn shower_spawns_on_cadence_and_expires() {
        let mut fx = FxState::default();
        fx.settings.density = Density::Normal;
        fx.start_shower(0.0, 2500.0);
        let shower = fx.shower.clone().expect("shower active");
        assert_eq!(shower.ends_at, 2500.0);

        // First tick spawns right away; rng 0.0 keeps it to one drop.
        fx.step_with(0.0, 800.0, &mut || 0.0);
        assert_eq!(fx.drops.len(), 1);
        // Before the next cadence point, nothing new.
        fx.step_with(30.0, 800.0, &mut || 0.0);
        assert_eq!(fx.drops.len(), 1);
        // rng 0.9 > 0.6 adds a second drop on the same tick.
        fx.step_with(70.0, 800.0, &mut || 0.9);
        assert_eq!(fx.drops.len(), 3);

        fx.step_with(2500.0, 800.0, &mut || 0.0);
        assert!(fx.shower.is_none());
    }

    #[test]
    fn shower_respects_drop_cap() {
        let mut fx = FxState::default();
        fx.start_shower(0.0, 60_000.0);
        let mut now = 0.0;
        // 64 ticks stay under the shortest fall time, so nothing retires
        // while the spawner pushes 2 drops per tick against the cap.
        for _ in 0..64 {
            fx.step_with(now, 800.0, &mut || 0.99);
            assert!(fx.drops.len() <= MAX_DROPS);
            now += 70.0;
        }
        assert_eq!(fx.drops.len(), MAX_DROPS);
    }

    #[test]
    fn reduce_motion_suppresses_all_spawns() {
        let mut fx = FxState::default();
        fx.apply_settings(Settings {
            reduce_motion: true,
            density: Density::Normal,
        });
        fx.spawn_float(10.0, 10.0, 0.0);
        fx.start_shower(0.0, 2500.0);
        assert!(fx.is_idle());
    }

    #[test]
    fn enabling_reduce_motion_clears_live_particles() {
        let mut fx = FxState::default();
        fx.floats.push(float_at(0.0));
        fx.start_shower(0.0, 2500.0);
        fx.apply_settings(Settings {
            reduce_motion: true,
            density: Density::Normal,
        });
        assert!(fx.is_idle());
    }
}
