use crate::invalidation::ChangeFlags;
use crate::layout::{Constraints, Size};
use crate::renderer::PaintContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Build a color from a packed ARGB value, the encoding used by the
    /// styled-attribute surface.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack back into ARGB, rounding each channel.
    pub fn to_argb(self) -> u32 {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
        (ch(self.a) << 24) | (ch(self.r) << 16) | (ch(self.g) << 8) | ch(self.b)
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Padding {
    fn from(v: f32) -> Self {
        Padding::all(v)
    }
}

/// A paintable element in the tree.
///
/// Layout runs top-down: a parent passes [`Constraints`], the widget returns
/// the [`Size`] it settled on and later receives its absolute origin through
/// [`Widget::set_origin`]. Paint runs in document order, so a parent that
/// wants content beneath its children simply draws before delegating.
pub trait Widget {
    fn layout(&mut self, constraints: Constraints) -> Size;

    /// Assign the widget's absolute position. Containers propagate this to
    /// their children, offset by their own padding.
    fn set_origin(&mut self, x: f32, y: f32);

    /// The rectangle occupied after the last layout pass.
    fn bounds(&self) -> Rect;

    fn paint(&self, ctx: &mut PaintContext);

    fn mark_dirty(&mut self, flags: ChangeFlags);
    fn needs_layout(&self) -> bool;

    /// Request that this widget be re-laid out (and repainted).
    /// Widgets caching rendered output intercept this to invalidate first.
    fn request_layout(&mut self) {
        self.mark_dirty(ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT);
    }
}

impl Widget for Box<dyn Widget> {
    fn layout(&mut self, constraints: Constraints) -> Size {
        (**self).layout(constraints)
    }
    fn set_origin(&mut self, x: f32, y: f32) {
        (**self).set_origin(x, y)
    }
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
    fn paint(&self, ctx: &mut PaintContext) {
        (**self).paint(ctx)
    }
    fn mark_dirty(&mut self, flags: ChangeFlags) {
        (**self).mark_dirty(flags)
    }
    fn needs_layout(&self) -> bool {
        (**self).needs_layout()
    }
    fn request_layout(&mut self) {
        (**self).request_layout()
    }
}
