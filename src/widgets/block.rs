use crate::invalidation::ChangeFlags;
use crate::layout::{Constraints, Size};
use crate::renderer::PaintContext;

use super::widget::{Color, Rect, Widget};

/// A solid-colored box with a preferred size. The leaf content widget used
/// by demos and tests.
pub struct Block {
    dirty_flags: ChangeFlags,
    preferred: Size,
    color: Color,
    bounds: Rect,
}

pub fn block(width: f32, height: f32, color: Color) -> Block {
    Block::new(width, height, color)
}

impl Block {
    pub fn new(width: f32, height: f32, color: Color) -> Self {
        Self {
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            preferred: Size::new(width, height),
            color,
            bounds: Rect::default(),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for Block {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = constraints.constrain(self.preferred);
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.color.a > 0.0 && !self.bounds.is_empty() {
            ctx.fill_rect(self.bounds, self.color);
        }
    }

    super::impl_dirty_flags!();
}
