use serde::{Deserialize, Serialize};

/// Wheel steps produced by one pixel of middle-button drag.
const DRAG_ZOOM_PER_PIXEL: f32 = 0.05;

/// Pointer buttons the controls distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// A camera action, independent of the windowing backend.
///
/// Orbit and pan deltas are in physical pixels; the controls normalize them
/// by the viewport height so the feel does not depend on window size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Rotate around the target.
    Orbit { dx: f32, dy: f32 },
    /// Move towards (positive) or away from (negative) the target, in wheel steps.
    Zoom(f32),
    /// Slide the target in the camera plane.
    Pan { dx: f32, dy: f32 },
    /// Input with no binding.
    Noop,
}

impl Action {
    /// Map a pointer drag. Primary orbits, secondary pans, middle zooms.
    pub fn from_drag(button: PointerButton, dx: f32, dy: f32) -> Self {
        if dx == 0.0 && dy == 0.0 {
            return Action::Noop;
        }
        match button {
            PointerButton::Primary => Action::Orbit { dx, dy },
            PointerButton::Secondary => Action::Pan { dx, dy },
            PointerButton::Middle => Action::Zoom(-dy * DRAG_ZOOM_PER_PIXEL),
        }
    }

    /// Map a scroll in wheel lines, positive when scrolling up.
    pub fn from_scroll(lines: f32) -> Self {
        if lines == 0.0 {
            Action::Noop
        } else {
            Action::Zoom(lines)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_maps_by_button() {
        assert_eq!(
            Action::from_drag(PointerButton::Primary, 3.0, -1.0),
            Action::Orbit { dx: 3.0, dy: -1.0 }
        );
        assert_eq!(
            Action::from_drag(PointerButton::Secondary, 3.0, -1.0),
            Action::Pan { dx: 3.0, dy: -1.0 }
        );
        assert!(matches!(
            Action::from_drag(PointerButton::Middle, 0.0, -10.0),
            Action::Zoom(z) if z > 0.0
        ));
    }

    #[test]
    fn zero_motion_is_noop() {
        assert_eq!(Action::from_drag(PointerButton::Primary, 0.0, 0.0), Action::Noop);
        assert_eq!(Action::from_scroll(0.0), Action::Noop);
    }

    #[test]
    fn scroll_up_zooms_in() {
        assert_eq!(Action::from_scroll(2.0), Action::Zoom(2.0));
    }
}
