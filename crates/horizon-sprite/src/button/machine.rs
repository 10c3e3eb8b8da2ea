//! The button interaction state machine.
//!
//! [`InteractionStateMachine`] turns touch phases into a [`ButtonStatus`] and a
//! list of [`EventKind`]s to announce. It knows nothing about appearance or
//! listeners; [`SpriteButton`](super::SpriteButton) applies the visual result
//! and the scene dispatches the returned kinds.
//!
//! A press starts on `TouchesBegan` and remembers the status the button was
//! resting in (`Normal` or `ToggledOn`). The press ends on release, on
//! cancellation, or on an `Ended`/`Cancelled` batch after a Reentry exit.

use super::listener::EventKind;

/// The discrete interaction state of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonStatus {
    /// Not held, not toggled on.
    #[default]
    Normal,
    /// Held down by at least one touch.
    Tapped,
    /// Ignoring all touch input until re-enabled.
    Disabled,
    /// Latched on by a completed press in toggle mode.
    ToggledOn,
}

/// How touch movement affects a held button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovePolicy {
    /// Stay held wherever the touch moves.
    #[default]
    AlwaysHeld,
    /// Release once every touch has left the bounds.
    ReleaseOut,
    /// Release on the first movement.
    ReleaseFast,
    /// Let go when every touch leaves the bounds and press again when a touch
    /// comes back, for as long as the contact lasts.
    Reentry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    /// Status to return to if the press does not complete.
    resting: ButtonStatus,
    /// Set after a Reentry exit; a touch coming back inside presses again.
    abandoned: bool,
}

/// Status, policy and press tracking for one button.
#[derive(Debug, Clone, Default)]
pub(crate) struct InteractionStateMachine {
    status: ButtonStatus,
    move_policy: MovePolicy,
    toggle_mode: bool,
    press: Option<Press>,
}

impl InteractionStateMachine {
    pub(crate) fn status(&self) -> ButtonStatus {
        self.status
    }

    pub(crate) fn is_disabled(&self) -> bool {
        self.status == ButtonStatus::Disabled
    }

    /// Toggled on, either visibly or underneath an ongoing press.
    pub(crate) fn is_toggled_on(&self) -> bool {
        match self.status {
            ButtonStatus::ToggledOn => true,
            ButtonStatus::Tapped => self
                .press
                .is_some_and(|press| press.resting == ButtonStatus::ToggledOn),
            _ => false,
        }
    }

    pub(crate) fn move_policy(&self) -> MovePolicy {
        self.move_policy
    }

    pub(crate) fn set_move_policy(&mut self, policy: MovePolicy) {
        self.move_policy = policy;
    }

    pub(crate) fn toggle_mode(&self) -> bool {
        self.toggle_mode
    }

    /// Returns `true` if the visible status changed.
    pub(crate) fn set_toggle_mode(&mut self, enabled: bool) -> bool {
        self.toggle_mode = enabled;
        if enabled {
            return false;
        }
        if let Some(press) = self.press.as_mut() {
            press.resting = ButtonStatus::Normal;
        }
        self.replace_status(ButtonStatus::ToggledOn, ButtonStatus::Normal)
    }

    // =========================================================================
    // Touch input
    // =========================================================================

    pub(crate) fn touches_began(&mut self) -> Vec<EventKind> {
        match self.status {
            ButtonStatus::Disabled => Vec::new(),
            ButtonStatus::Tapped => vec![EventKind::TouchesBegan],
            resting @ (ButtonStatus::Normal | ButtonStatus::ToggledOn) => {
                self.press = Some(Press {
                    resting,
                    abandoned: false,
                });
                self.status = ButtonStatus::Tapped;
                vec![EventKind::TouchesBegan]
            }
        }
    }

    /// `all_outside` is true when every touch of the batch lies outside the
    /// bounds. `keep_toggled_on` forbids a release from switching the button
    /// off (it is the active member of an exclusive group).
    pub(crate) fn touches_moved(
        &mut self,
        all_outside: bool,
        keep_toggled_on: bool,
    ) -> Vec<EventKind> {
        if self.is_disabled() {
            return Vec::new();
        }

        let mut events = vec![EventKind::TouchesMoved];
        match (self.status, self.move_policy) {
            (ButtonStatus::Tapped, MovePolicy::AlwaysHeld) => {}
            (ButtonStatus::Tapped, MovePolicy::ReleaseFast) => {
                events.extend(self.release(keep_toggled_on));
            }
            (ButtonStatus::Tapped, MovePolicy::ReleaseOut) if all_outside => {
                events.extend(self.release(keep_toggled_on));
            }
            (ButtonStatus::Tapped, MovePolicy::Reentry) if all_outside => {
                let resting = self.resting_status();
                if let Some(press) = self.press.as_mut() {
                    press.abandoned = true;
                }
                self.status = resting;
                events.push(EventKind::TouchesEnded);
            }
            (_, MovePolicy::Reentry) if !all_outside && self.is_abandoned() => {
                if let Some(press) = self.press.as_mut() {
                    press.abandoned = false;
                }
                self.status = ButtonStatus::Tapped;
                events.push(EventKind::TouchesBegan);
            }
            _ => {}
        }
        events
    }

    pub(crate) fn touches_ended(&mut self, keep_toggled_on: bool) -> Vec<EventKind> {
        match self.status {
            ButtonStatus::Disabled => Vec::new(),
            ButtonStatus::Tapped => self.release(keep_toggled_on),
            _ => {
                self.press = None;
                Vec::new()
            }
        }
    }

    pub(crate) fn touches_cancelled(&mut self) -> Vec<EventKind> {
        match self.status {
            ButtonStatus::Disabled => Vec::new(),
            ButtonStatus::Tapped => {
                self.status = self.resting_status();
                self.press = None;
                vec![EventKind::TouchesCancelled]
            }
            _ => {
                self.press = None;
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Owner-driven changes (never announced)
    // =========================================================================

    /// Returns `true` if the status changed.
    pub(crate) fn disable(&mut self) -> bool {
        self.press = None;
        let changed = self.status != ButtonStatus::Disabled;
        self.status = ButtonStatus::Disabled;
        changed
    }

    /// Returns `true` if the status changed.
    pub(crate) fn enable(&mut self) -> bool {
        self.replace_status(ButtonStatus::Disabled, ButtonStatus::Normal)
    }

    /// Returns `true` if the visible status changed.
    pub(crate) fn set_toggled_on(&mut self, on: bool) -> bool {
        if !self.toggle_mode || self.is_disabled() {
            return false;
        }
        let target = if on {
            ButtonStatus::ToggledOn
        } else {
            ButtonStatus::Normal
        };
        // An abandoned Reentry press shows its resting status, so the press
        // has to follow too or the next release starts from a stale value.
        if let Some(press) = self.press.as_mut() {
            press.resting = target;
        }
        if self.status == ButtonStatus::Tapped {
            return false;
        }
        let changed = self.status != target;
        self.status = target;
        changed
    }

    /// Switch off a toggled-on button on behalf of its exclusive group.
    ///
    /// Returns `true` if the button was toggled on, visibly or under a press.
    pub(crate) fn switch_off(&mut self) -> bool {
        if !self.is_toggled_on() {
            return false;
        }
        self.set_toggled_on(false);
        true
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn release(&mut self, keep_toggled_on: bool) -> Vec<EventKind> {
        let resting = self.resting_status();
        self.press = None;

        if !self.toggle_mode {
            self.status = ButtonStatus::Normal;
            return vec![EventKind::TouchesEnded];
        }

        match resting {
            ButtonStatus::ToggledOn if keep_toggled_on => {
                self.status = ButtonStatus::ToggledOn;
                vec![EventKind::TouchesEnded]
            }
            ButtonStatus::ToggledOn => {
                self.status = ButtonStatus::Normal;
                vec![EventKind::ToggledOff, EventKind::TouchesEnded]
            }
            _ => {
                self.status = ButtonStatus::ToggledOn;
                vec![EventKind::ToggledOn, EventKind::TouchesEnded]
            }
        }
    }

    fn resting_status(&self) -> ButtonStatus {
        self.press
            .map(|press| press.resting)
            .unwrap_or(ButtonStatus::Normal)
    }

    fn is_abandoned(&self) -> bool {
        self.press.is_some_and(|press| press.abandoned)
    }

    fn replace_status(&mut self, from: ButtonStatus, to: ButtonStatus) -> bool {
        if self.status == from {
            self.status = to;
            true
        } else {
            false
        }
    }
}
