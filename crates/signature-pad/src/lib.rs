//! Freehand signature capture
//!
//! A [`SignaturePad`] owns an opaque-white bitmap sized to its container and
//! turns mouse or touch motion into black polyline strokes. The host UI feeds
//! it pointer events in client coordinates and calls [`SignaturePad::resize`]
//! from its own viewport-resize callback.
//!
//! ```
//! use signature_pad::{ContainerLayout, PadEvent, Point, PointerInput, SignaturePad};
//!
//! let mut pad = SignaturePad::new(ContainerLayout::new(400.0, Point::new(0.0, 0.0))).unwrap();
//! assert!(pad.is_empty());
//!
//! let _ = pad.handle(&PadEvent::Down(PointerInput::mouse(10.0, 10.0)));
//! let _ = pad.handle(&PadEvent::Move(PointerInput::mouse(60.0, 40.0)));
//! let _ = pad.handle(&PadEvent::Up);
//! assert!(!pad.is_empty());
//! ```

pub mod input;
pub mod pad;

pub use input::{Disposition, PadEvent, Point, PointerInput};
pub use pad::{
    ContainerLayout, PadError, SignaturePad, HORIZONTAL_INSET, STROKE_WIDTH, SURFACE_HEIGHT,
};
