pub mod blur;
pub mod mask;

pub use blur::blur_alpha;
pub use mask::{extract_alpha, tint_mask};

use std::path::Path;

use tiny_skia::{Paint, Pixmap, PixmapPaint, PixmapRef, Transform};

use crate::layout::{Constraints, Size};
use crate::widgets::{Color, Rect, Widget};

/// CPU paint surface the widget tree draws into.
///
/// Wraps a premultiplied-alpha [`Pixmap`] and carries a translation so the
/// same paint code can target either the frame (absolute coordinates) or an
/// offscreen scratch pixmap in widget-local coordinates.
pub struct PaintContext {
    pixmap: Pixmap,
    offset_x: f32,
    offset_y: f32,
}

impl PaintContext {
    /// Create a fully-transparent surface. Returns `None` for zero sizes,
    /// matching `Pixmap` allocation rules.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            offset_x: 0.0,
            offset_y: 0.0,
        })
    }

    /// Create a surface whose draw calls are translated by `(offset_x,
    /// offset_y)`. Used to rasterize a subtree into a pixmap of its own size.
    pub fn with_offset(width: u32, height: u32, offset_x: f32, offset_y: f32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            offset_x,
            offset_y,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(sk_rect) = tiny_skia::Rect::from_xywh(
            rect.x + self.offset_x,
            rect.y + self.offset_y,
            rect.width,
            rect.height,
        ) else {
            return;
        };
        let Some(sk_color) = tiny_skia::Color::from_rgba(
            color.r.clamp(0.0, 1.0),
            color.g.clamp(0.0, 1.0),
            color.b.clamp(0.0, 1.0),
            color.a.clamp(0.0, 1.0),
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(sk_color);
        paint.anti_alias = true;
        self.pixmap
            .fill_rect(sk_rect, &paint, Transform::identity(), None);
    }

    /// Composite `source` over this surface at the given position,
    /// full opacity, source-over.
    pub fn draw_pixmap(&mut self, x: f32, y: f32, source: PixmapRef<'_>) {
        self.pixmap.draw_pixmap(
            (x + self.offset_x).round() as i32,
            (y + self.offset_y).round() as i32,
            source,
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

/// Run a full frame: layout the tree into `width`×`height`, position it at
/// the origin, and paint. Returns `None` only for a zero-sized frame.
pub fn render_root(root: &mut dyn Widget, width: u32, height: u32) -> Option<Pixmap> {
    let mut ctx = PaintContext::new(width, height)?;
    root.layout(Constraints::loose(Size::new(width as f32, height as f32)));
    root.set_origin(0.0, 0.0);
    root.paint(&mut ctx);
    Some(ctx.into_pixmap())
}

/// Convert a premultiplied pixmap into a straight-alpha [`image::RgbaImage`].
pub fn to_rgba_image(pixmap: &Pixmap) -> image::RgbaImage {
    image::RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        match pixmap.pixel(x, y) {
            Some(px) => {
                let c = px.demultiply();
                image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
            }
            None => image::Rgba([0, 0, 0, 0]),
        }
    })
}

/// Write a rendered frame out as PNG.
pub fn save_png(pixmap: &Pixmap, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
    to_rgba_image(pixmap).save(path.as_ref())
}
