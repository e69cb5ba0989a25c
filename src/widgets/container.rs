use crate::invalidation::ChangeFlags;
use crate::layout::{Constraints, Size};
use crate::renderer::PaintContext;

use super::widget::{Color, Padding, Rect, Widget};

/// A generic child host: measures children inside its padding, stacks them
/// at the padded origin, and sizes itself to the largest child.
pub struct Container {
    dirty_flags: ChangeFlags,
    children: Vec<Box<dyn Widget>>,
    padding: Padding,
    background: Color,
    min_width: Option<f32>,
    min_height: Option<f32>,
    bounds: Rect,
}

pub fn container() -> Container {
    Container::new()
}

impl Container {
    pub fn new() -> Self {
        Self {
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            children: Vec::new(),
            padding: Padding::default(),
            background: Color::TRANSPARENT,
            min_width: None,
            min_height: None,
            bounds: Rect::default(),
        }
    }

    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(Box::new(widget));
        self
    }

    pub fn padding(mut self, value: impl Into<Padding>) -> Self {
        self.padding = value.into();
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = Some(height);
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let child_constraints =
            constraints.deflate(self.padding.horizontal(), self.padding.vertical());

        let mut content = Size::zero();
        for child in &mut self.children {
            let child_size = child.layout(child_constraints);
            content.width = content.width.max(child_size.width);
            content.height = content.height.max(child_size.height);
        }

        let mut width = content.width + self.padding.horizontal();
        let mut height = content.height + self.padding.vertical();
        if let Some(min_w) = self.min_width {
            width = width.max(min_w);
        }
        if let Some(min_h) = self.min_height {
            height = height.max(min_h);
        }

        let size = constraints.constrain(Size::new(width, height));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        for child in &mut self.children {
            child.set_origin(x + self.padding.left, y + self.padding.top);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.background.a > 0.0 && !self.bounds.is_empty() {
            ctx.fill_rect(self.bounds, self.background);
        }
        for child in &self.children {
            child.paint(ctx);
        }
    }

    super::impl_dirty_flags!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::block::Block;

    #[test]
    fn test_container_sizes_to_child_plus_padding() {
        let mut c = Container::new()
            .padding(10.0)
            .child(Block::new(40.0, 20.0, Color::BLACK));
        let size = c.layout(Constraints::loose(Size::new(200.0, 200.0)));
        assert_eq!(size, Size::new(60.0, 40.0));
    }

    #[test]
    fn test_container_stacks_children_at_padded_origin() {
        let mut c = Container::new()
            .padding(5.0)
            .child(Block::new(10.0, 10.0, Color::BLACK))
            .child(Block::new(20.0, 8.0, Color::WHITE));
        let size = c.layout(Constraints::loose(Size::new(100.0, 100.0)));
        c.set_origin(0.0, 0.0);
        // Largest child wins on each axis.
        assert_eq!(size, Size::new(30.0, 20.0));
    }

    #[test]
    fn test_container_min_size() {
        let mut c = Container::new().min_width(50.0).min_height(25.0);
        let size = c.layout(Constraints::loose(Size::new(100.0, 100.0)));
        assert_eq!(size, Size::new(50.0, 25.0));
    }

    #[test]
    fn test_empty_container_collapses() {
        let mut c = Container::new();
        let size = c.layout(Constraints::loose(Size::new(100.0, 100.0)));
        assert_eq!(size, Size::zero());
    }

    #[test]
    fn test_background_painted_behind_children() {
        let mut c = Container::new()
            .background(Color::rgb(1.0, 1.0, 1.0))
            .padding(2.0)
            .child(Block::new(4.0, 4.0, Color::rgb(1.0, 0.0, 0.0)));
        c.layout(Constraints::loose(Size::new(8.0, 8.0)));
        c.set_origin(0.0, 0.0);
        let mut ctx = PaintContext::new(8, 8).unwrap();
        c.paint(&mut ctx);
        // Padding area shows the background, the middle shows the child.
        assert_eq!(ctx.pixmap().pixel(0, 0).unwrap().green(), 255);
        let mid = ctx.pixmap().pixel(4, 4).unwrap();
        assert_eq!(mid.red(), 255);
        assert_eq!(mid.green(), 0);
    }
}
