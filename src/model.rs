//! Core interaction state for the Valentine prompt.
//! The YES button grows (and NO shrinks) with every rejection until the
//! YES "balloon" pops and the view switches to the affirmative panel.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// How much the YES button grows per NO press.
pub const YES_GROW_STEP: f64 = 0.20;
/// How much the NO button shrinks per NO press.
pub const NO_SHRINK_STEP: f64 = 0.09;
/// Scale at which the YES balloon pops.
pub const YES_MAX: f64 = 1.55;
/// NO never shrinks below this.
pub const NO_MIN: f64 = 0.58;

/// How the user ended up on the affirmative panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// YES was clicked directly.
    Direct,
    /// The YES balloon reached its max scale and popped.
    Popped,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptState {
    /// Number of NO presses since the last reset.
    pub no_clicks: u32,
    pub yes_scale: f64,
    pub no_scale: f64,
    /// Set once the user is committed to the affirmative panel.
    pub outcome: Option<Outcome>,
    /// Bumped on every reduce so effects can key off state changes.
    pub version: u64,
}

impl Default for PromptState {
    fn default() -> Self {
        Self {
            no_clicks: 0,
            yes_scale: 1.0,
            no_scale: 1.0,
            outcome: None,
            version: 0,
        }
    }
}

impl PromptState {
    pub fn popped(&self) -> bool {
        self.outcome == Some(Outcome::Popped)
    }
}

/// YES scale after `clicks` NO presses, clamped at the pop threshold.
pub fn yes_scale_after(clicks: u32) -> f64 {
    (1.0 + clicks as f64 * YES_GROW_STEP).min(YES_MAX)
}

/// NO scale after `clicks` NO presses, clamped at the floor.
pub fn no_scale_after(clicks: u32) -> f64 {
    (1.0 - clicks as f64 * NO_SHRINK_STEP).max(NO_MIN)
}

/// How many NO presses it takes to pop the YES balloon.
pub fn clicks_to_pop() -> u32 {
    ((YES_MAX - 1.0) / YES_GROW_STEP).ceil() as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptAction {
    NoPressed,
    YesPressed,
    Reset,
}

impl Reducible for PromptState {
    type Action = PromptAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use PromptAction::*;
        let mut new = (*self).clone();
        match action {
            NoPressed => {
                // Once an outcome is locked in, further presses are ignored.
                if new.outcome.is_some() {
                    return self;
                }
                new.no_clicks = new.no_clicks.saturating_add(1);
                new.yes_scale = yes_scale_after(new.no_clicks);
                new.no_scale = no_scale_after(new.no_clicks);
                if new.yes_scale >= YES_MAX {
                    new.outcome = Some(Outcome::Popped);
                }
            }
            YesPressed => {
                if new.outcome.is_some() {
                    return self;
                }
                new.outcome = Some(Outcome::Direct);
            }
            Reset => {
                new = PromptState::default();
            }
        }
        new.version = self.version.wrapping_add(1);
        Rc::new(new)
    }
}

// ---------------- Settings -----------------

/// Heart shower density; scales the drop spawn cadence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Density {
    Low,
    #[default]
    Normal,
    High,
}

impl Density {
    /// Milliseconds between shower spawn ticks.
    pub fn spawn_every_ms(self) -> f64 {
        match self {
            Density::Low => 140.0,
            Density::Normal => 70.0,
            Density::High => 45.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Density::Low => "Low",
            Density::Normal => "Normal",
            Density::High => "High",
        }
    }
}

/// Persisted user settings (localStorage, JSON).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub reduce_motion: bool,
    pub density: Density,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch(state: PromptState, action: PromptAction) -> PromptState {
        let next = Rc::new(state).reduce(action);
        (*next).clone()
    }

    #[test]
    fn no_presses_grow_yes_and_shrink_no() {
        let mut s = PromptState::default();
        s = dispatch(s, PromptAction::NoPressed);
        assert_eq!(s.no_clicks, 1);
        assert!((s.yes_scale - 1.20).abs() < 1e-9);
        assert!((s.no_scale - 0.91).abs() < 1e-9);
        assert_eq!(s.outcome, None);
    }

    #[test]
    fn balloon_pops_after_enough_presses() {
        let mut s = PromptState::default();
        for _ in 0..clicks_to_pop() {
            s = dispatch(s, PromptAction::NoPressed);
        }
        assert_eq!(s.outcome, Some(Outcome::Popped));
        assert!(s.popped());
        assert!((s.yes_scale - YES_MAX).abs() < 1e-9);
    }

    #[test]
    fn presses_after_outcome_are_ignored() {
        let mut s = PromptState::default();
        for _ in 0..clicks_to_pop() {
            s = dispatch(s, PromptAction::NoPressed);
        }
        let before = s.clone();
        s = dispatch(s, PromptAction::NoPressed);
        assert_eq!(s, before);
        s = dispatch(s, PromptAction::YesPressed);
        assert_eq!(s, before);
    }

    #[test]
    fn scales_stay_clamped() {
        for clicks in 0..50 {
            assert!(yes_scale_after(clicks) <= YES_MAX);
            assert!(no_scale_after(clicks) >= NO_MIN);
        }
        // Monotone until the clamp kicks in.
        assert!(yes_scale_after(2) > yes_scale_after(1));
        assert!(no_scale_after(2) < no_scale_after(1));
    }

    #[test]
    fn direct_yes_sets_outcome_without_scaling() {
        let s = dispatch(PromptState::default(), PromptAction::YesPressed);
        assert_eq!(s.outcome, Some(Outcome::Direct));
        assert!((s.yes_scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_defaults_and_bumps_version() {
        let mut s = PromptState::default();
        s = dispatch(s, PromptAction::NoPressed);
        s = dispatch(s, PromptAction::NoPressed);
        let v = s.version;
        s = dispatch(s, PromptAction::Reset);
        assert_eq!(s.no_clicks, 0);
        assert!((s.yes_scale - 1.0).abs() < 1e-9);
        assert!((s.no_scale - 1.0).abs() < 1e-9);
        assert_eq!(s.outcome, None);
        assert_eq!(s.version, v + 1);
    }
}
