//! The drawable signature surface

use intake_types::SignatureImage;
use thiserror::Error;
use tiny_skia::{Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use crate::input::{Disposition, PadEvent, Point, PointerInput};

/// Pixels subtracted from the container width
pub const HORIZONTAL_INSET: f32 = 40.0;

/// Fixed bitmap height in pixels
pub const SURFACE_HEIGHT: u32 = 150;

/// Pen width in pixels
pub const STROKE_WIDTH: f32 = 2.0;

#[derive(Error, Debug, PartialEq)]
pub enum PadError {
    #[error("Container width {0} leaves no drawable area")]
    ContainerTooNarrow(f32),

    #[error("Cannot allocate a {width}x{height} surface")]
    Allocation { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Container geometry the host reads from its layout engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerLayout {
    /// Width of the element that contains the surface
    pub container_width: f32,
    /// Top-left corner of the surface's bounding box in client space
    pub origin: Point,
}

impl ContainerLayout {
    pub fn new(container_width: f32, origin: Point) -> Self {
        Self {
            container_width,
            origin,
        }
    }

    fn surface_width(&self) -> Result<u32, PadError> {
        let width = (self.container_width - HORIZONTAL_INSET).floor();
        if !width.is_finite() || width < 1.0 {
            return Err(PadError::ContainerTooNarrow(self.container_width));
        }
        Ok(width as u32)
    }
}

/// A signature capture surface.
///
/// Constructing the pad is what binds it to a container, so there is no
/// unbound state to misuse. Stroke state is `idle` until a `Down` event and
/// returns to `idle` on `Up` or `Leave`.
pub struct SignaturePad {
    pixmap: Pixmap,
    origin: Point,
    /// Last recorded point while a stroke is active
    cursor: Option<Point>,
    paint: Paint<'static>,
    stroke: Stroke,
}

impl SignaturePad {
    /// Size a fresh white surface to `layout`
    pub fn new(layout: ContainerLayout) -> Result<Self, PadError> {
        let pixmap = blank_surface(&layout)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: STROKE_WIDTH,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        debug!(
            "Signature surface initialized at {}x{}",
            pixmap.width(),
            pixmap.height()
        );

        Ok(Self {
            pixmap,
            origin: layout.origin,
            cursor: None,
            paint,
            stroke,
        })
    }

    /// Re-run sizing after the viewport changed.
    ///
    /// The surface is reallocated white, so existing strokes are dropped and
    /// any active stroke ends. On error the current surface is kept.
    pub fn resize(&mut self, layout: ContainerLayout) -> Result<(), PadError> {
        self.pixmap = blank_surface(&layout)?;
        self.origin = layout.origin;
        self.cursor = None;
        debug!(
            "Signature surface resized to {}x{}",
            self.pixmap.width(),
            self.pixmap.height()
        );
        Ok(())
    }

    /// Update the bounding-box origin without touching the bitmap (scrolling)
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn is_drawing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Route a host event to the matching stroke operation
    pub fn handle(&mut self, event: &PadEvent) -> Disposition {
        match event {
            PadEvent::Down(input) => self.begin_stroke(input),
            PadEvent::Move(input) => self.extend_stroke(input),
            PadEvent::Up | PadEvent::Leave => {
                self.end_stroke();
                Disposition::Pass
            }
        }
    }

    /// Start a stroke at the event position
    pub fn begin_stroke(&mut self, input: &PointerInput) -> Disposition {
        let Some(client) = input.client_position() else {
            return Disposition::Pass;
        };
        self.cursor = Some(client.relative_to(self.origin));
        Disposition::PreventDefault
    }

    /// Draw a straight segment from the last point to the event position
    pub fn extend_stroke(&mut self, input: &PointerInput) -> Disposition {
        let (Some(from), Some(client)) = (self.cursor, input.client_position()) else {
            return Disposition::Pass;
        };
        let to = client.relative_to(self.origin);
        self.draw_segment(from, to);
        self.cursor = Some(to);
        Disposition::PreventDefault
    }

    pub fn end_stroke(&mut self) {
        self.cursor = None;
    }

    /// Repaint the whole surface white; dimensions are unchanged
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
    }

    /// True iff every pixel is pure white. Scans the full bitmap.
    pub fn is_empty(&self) -> bool {
        self.pixmap
            .pixels()
            .iter()
            .all(|p| p.red() == 255 && p.green() == 255 && p.blue() == 255)
    }

    /// Encode the current bitmap as a PNG data URI
    pub fn export(&self) -> Result<SignatureImage, PadError> {
        let png = self
            .pixmap
            .encode_png()
            .map_err(|e| PadError::Encode(e.to_string()))?;
        Ok(SignatureImage::from_png(&png))
    }

    fn draw_segment(&mut self, from: Point, to: Point) {
        if from == to {
            // A round cap on a zero-length segment is a dot
            if let Some(dot) = PathBuilder::from_circle(from.x, from.y, STROKE_WIDTH / 2.0) {
                self.pixmap.fill_path(
                    &dot,
                    &self.paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            return;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        if let Some(path) = builder.finish() {
            self.pixmap.stroke_path(
                &path,
                &self.paint,
                &self.stroke,
                Transform::identity(),
                None,
            );
        }
    }

    #[cfg(test)]
    fn pixels_mut(&mut self) -> &mut [tiny_skia::PremultipliedColorU8] {
        self.pixmap.pixels_mut()
    }
}

fn blank_surface(layout: &ContainerLayout) -> Result<Pixmap, PadError> {
    let width = layout.surface_width()?;
    let mut pixmap = Pixmap::new(width, SURFACE_HEIGHT).ok_or(PadError::Allocation {
        width,
        height: SURFACE_HEIGHT,
    })?;
    pixmap.fill(Color::WHITE);
    Ok(pixmap)
}
