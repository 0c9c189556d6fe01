//! Pointer input as delivered by the host UI

/// A position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate a client-space point into the space of a surface whose
    /// bounding box starts at `origin`
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Coordinates carried by a mouse-type or touch-type event, in client space
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse { client: Point },
    Touch { touches: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(client_x: f32, client_y: f32) -> Self {
        PointerInput::Mouse {
            client: Point::new(client_x, client_y),
        }
    }

    /// A touch event with a single active touch point
    pub fn touch(client_x: f32, client_y: f32) -> Self {
        PointerInput::Touch {
            touches: vec![Point::new(client_x, client_y)],
        }
    }

    /// Mouse events report their own position; touch events report the
    /// first touch point. A touch event with no touches has no position.
    pub fn client_position(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse { client } => Some(*client),
            PointerInput::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Events the capture surface listens to
#[derive(Debug, Clone, PartialEq)]
pub enum PadEvent {
    /// `mousedown` / `touchstart`
    Down(PointerInput),
    /// `mousemove` / `touchmove`
    Move(PointerInput),
    /// `mouseup` / `touchend`
    Up,
    /// `mouseout`: handled exactly like `Up`
    Leave,
}

/// What the host should do with the browser event after the pad saw it
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Call `preventDefault()` so the browser does not scroll or zoom
    PreventDefault,
    /// Leave default handling alone
    Pass,
}
