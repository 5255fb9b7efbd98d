//! Drawer state machine and gesture protocol.
//!
//! States: `Closed` → `Opening` → `Open` → `Closing` → `Closed`. A drag
//! updates the drawer position continuously; on release the next state is
//! decided by displacement against 30% of the drawer width OR velocity
//! against 0.3 px/ms, whichever commits first (a flick can override a
//! short drag). Below both thresholds the drawer returns to its pre-drag
//! state.

use kerala_core::DomainError;
use serde::{Deserialize, Serialize};

use crate::route::DrawerRoute;

/// Displacement fraction of the drawer width that commits a transition.
pub const COMMIT_FRACTION: f32 = 0.30;

/// Release velocity (px/ms) that commits a transition regardless of
/// displacement.
pub const FLICK_VELOCITY: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerState {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    /// State when the drag started; a failed release returns here.
    from: DrawerState,
    start_position: f32,
    position: f32,
}

/// Headless drawer. Position is in pixels from the left edge, `0.0` closed
/// to `width` fully open; the embedder renders it.
#[derive(Debug)]
pub struct Drawer {
    state: DrawerState,
    width: f32,
    drag: Option<Drag>,
}

impl Drawer {
    pub fn new(width: f32) -> Self {
        Self {
            state: DrawerState::Closed,
            width,
            drag: None,
        }
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Current position for rendering: the live drag position while a
    /// gesture is active, the resting position otherwise.
    pub fn position(&self) -> f32 {
        match &self.drag {
            Some(drag) => drag.position,
            None => match self.state {
                DrawerState::Closed | DrawerState::Opening => 0.0,
                DrawerState::Open | DrawerState::Closing => self.width,
            },
        }
    }

    /// Menu button press.
    pub fn press_menu(&mut self) -> Result<(), DomainError> {
        match self.state {
            DrawerState::Closed => {
                self.state = DrawerState::Opening;
                Ok(())
            }
            _ => Err(DomainError::invariant("menu press only opens a closed drawer")),
        }
    }

    /// Backdrop tap while open.
    pub fn backdrop_tap(&mut self) -> Result<(), DomainError> {
        match self.state {
            DrawerState::Open => {
                self.state = DrawerState::Closing;
                Ok(())
            }
            _ => Err(DomainError::invariant("backdrop is only tappable while open")),
        }
    }

    /// Item selection while open: begins the close and immediately yields
    /// the navigation target (no artificial delay before navigating).
    pub fn select_item(&mut self, route: DrawerRoute) -> Result<DrawerRoute, DomainError> {
        match self.state {
            DrawerState::Open => {
                self.state = DrawerState::Closing;
                Ok(route)
            }
            _ => Err(DomainError::invariant("items are only selectable while open")),
        }
    }

    /// The open/close animation finished.
    pub fn animation_complete(&mut self) {
        self.state = match self.state {
            DrawerState::Opening => DrawerState::Open,
            DrawerState::Closing => DrawerState::Closed,
            settled => settled,
        };
    }

    /// A drag begins: left-edge swipe from closed, or any drag while open.
    pub fn drag_start(&mut self) -> Result<(), DomainError> {
        match self.state {
            DrawerState::Closed | DrawerState::Open => {
                let position = self.position();
                self.drag = Some(Drag {
                    from: self.state,
                    start_position: position,
                    position,
                });
                Ok(())
            }
            _ => Err(DomainError::invariant("drag cannot start mid-animation")),
        }
    }

    /// Continuous drag update; the position tracks the finger, clamped to
    /// the drawer's travel range.
    pub fn drag_move(&mut self, dx: f32) -> Result<(), DomainError> {
        let width = self.width;
        let drag = self
            .drag
            .as_mut()
            .ok_or_else(|| DomainError::invariant("drag_move without drag_start"))?;
        drag.position = (drag.start_position + dx).clamp(0.0, width);
        Ok(())
    }

    /// Release: commit or revert based on displacement and velocity.
    ///
    /// `velocity` is signed px/ms, positive rightward (the opening
    /// direction).
    pub fn drag_release(&mut self, velocity: f32) -> Result<DrawerState, DomainError> {
        let drag = self
            .drag
            .take()
            .ok_or_else(|| DomainError::invariant("drag_release without drag_start"))?;

        let displacement = drag.position - drag.start_position;
        let commit_distance = self.width * COMMIT_FRACTION;

        self.state = match drag.from {
            DrawerState::Closed => {
                let opening = displacement >= commit_distance || velocity >= FLICK_VELOCITY;
                if opening { DrawerState::Opening } else { DrawerState::Closed }
            }
            DrawerState::Open => {
                let closing = -displacement >= commit_distance || velocity <= -FLICK_VELOCITY;
                if closing { DrawerState::Closing } else { DrawerState::Open }
            }
            settled => settled,
        };
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 300.0;

    fn drawer() -> Drawer {
        Drawer::new(WIDTH)
    }

    fn open_drawer() -> Drawer {
        let mut d = drawer();
        d.press_menu().unwrap();
        d.animation_complete();
        d
    }

    #[test]
    fn menu_press_opens_through_opening() {
        let mut d = drawer();
        d.press_menu().unwrap();
        assert_eq!(d.state(), DrawerState::Opening);
        d.animation_complete();
        assert_eq!(d.state(), DrawerState::Open);
    }

    #[test]
    fn backdrop_tap_closes_through_closing() {
        let mut d = open_drawer();
        d.backdrop_tap().unwrap();
        assert_eq!(d.state(), DrawerState::Closing);
        d.animation_complete();
        assert_eq!(d.state(), DrawerState::Closed);
    }

    #[test]
    fn short_slow_drag_returns_to_pre_drag_state() {
        // Closed stays closed.
        let mut d = drawer();
        d.drag_start().unwrap();
        d.drag_move(WIDTH * 0.29).unwrap();
        assert_eq!(d.drag_release(0.29).unwrap(), DrawerState::Closed);

        // Open stays open.
        let mut d = open_drawer();
        d.drag_start().unwrap();
        d.drag_move(-WIDTH * 0.29).unwrap();
        assert_eq!(d.drag_release(-0.29).unwrap(), DrawerState::Open);
    }

    #[test]
    fn displacement_at_threshold_commits() {
        let mut d = drawer();
        d.drag_start().unwrap();
        d.drag_move(WIDTH * 0.30).unwrap();
        assert_eq!(d.drag_release(0.0).unwrap(), DrawerState::Opening);

        let mut d = open_drawer();
        d.drag_start().unwrap();
        d.drag_move(-WIDTH * 0.30).unwrap();
        assert_eq!(d.drag_release(0.0).unwrap(), DrawerState::Closing);
    }

    #[test]
    fn flick_velocity_overrides_short_displacement() {
        let mut d = drawer();
        d.drag_start().unwrap();
        d.drag_move(10.0).unwrap();
        assert_eq!(d.drag_release(0.3).unwrap(), DrawerState::Opening);

        let mut d = open_drawer();
        d.drag_start().unwrap();
        d.drag_move(-10.0).unwrap();
        assert_eq!(d.drag_release(-0.3).unwrap(), DrawerState::Closing);
    }

    #[test]
    fn flick_in_the_wrong_direction_does_not_commit() {
        let mut d = drawer();
        d.drag_start().unwrap();
        d.drag_move(10.0).unwrap();
        // Leftward flick while opening from closed: stay closed.
        assert_eq!(d.drag_release(-0.5).unwrap(), DrawerState::Closed);
    }

    #[test]
    fn drag_position_tracks_continuously_and_clamps() {
        let mut d = drawer();
        d.drag_start().unwrap();
        d.drag_move(120.0).unwrap();
        assert_eq!(d.position(), 120.0);
        d.drag_move(WIDTH * 2.0).unwrap();
        assert_eq!(d.position(), WIDTH);
        d.drag_move(-WIDTH * 3.0).unwrap();
        assert_eq!(d.position(), 0.0);
    }

    #[test]
    fn item_selection_closes_and_yields_navigation_immediately() {
        let mut d = open_drawer();
        let target = d.select_item(DrawerRoute::StoreProfile).unwrap();
        assert_eq!(target, DrawerRoute::StoreProfile);
        assert_eq!(d.state(), DrawerState::Closing);
    }

    #[test]
    fn gestures_are_rejected_mid_animation() {
        let mut d = drawer();
        d.press_menu().unwrap();
        assert!(d.drag_start().is_err());
        assert!(d.press_menu().is_err());
        assert!(d.select_item(DrawerRoute::Support).is_err());
    }
}
