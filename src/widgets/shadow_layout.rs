use std::cell::RefCell;

use tiny_skia::Pixmap;

use crate::invalidation::ChangeFlags;
use crate::layout::{Constraints, Size};
use crate::renderer::{blur_alpha, extract_alpha, tint_mask, PaintContext};

use super::widget::{Color, Padding, Rect, Widget};

const DEFAULT_SHADOW_RADIUS: f32 = 30.0;
const DEFAULT_SHADOW_DISTANCE: f32 = 15.0;
const DEFAULT_SHADOW_ANGLE: f32 = 45.0;
/// Medium gray, fully opaque (ARGB).
const DEFAULT_SHADOW_COLOR: u32 = 0xFF44_4444;
const MIN_RADIUS: f32 = 0.1;
const MIN_ANGLE: f32 = 0.0;
const MAX_ANGLE: f32 = 360.0;
/// Small fixed downward push added to the computed offset, so even an
/// angle-0 shadow reads as cast by an overhead light.
const BASE_OFFSET_Y: f32 = 2.0;

/// The declarative attribute set for [`ShadowLayout`], read once at
/// construction. Out-of-range values are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    pub shadowed: bool,
    pub radius: f32,
    pub distance: f32,
    /// Light direction in degrees, clamped into [0, 360].
    pub angle: f32,
    pub color: Color,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            shadowed: true,
            radius: DEFAULT_SHADOW_RADIUS,
            distance: DEFAULT_SHADOW_DISTANCE,
            angle: DEFAULT_SHADOW_ANGLE,
            color: Color::from_argb(DEFAULT_SHADOW_COLOR),
        }
    }
}

struct ShadowCache {
    pixmap: Option<Pixmap>,
    dirty: bool,
    /// Bumped on every successful regeneration; lets callers observe cache
    /// reuse vs. reallocation.
    generation: u64,
}

impl ShadowCache {
    fn new() -> Self {
        Self {
            pixmap: None,
            dirty: true,
            generation: 0,
        }
    }
}

/// A container that composites a soft drop-shadow beneath its children.
///
/// The shadow is the children's combined silhouette: they are rasterized
/// into an offscreen pixmap, the alpha channel is extracted and blurred,
/// and the result is tinted and drawn offset by the light direction. The
/// offscreen pixmap is cached and only rebuilt when the configuration,
/// bounds, or a layout request invalidates it, so steady-state frames pay
/// a single blit.
///
/// Padding of `ceil(distance + radius)` is applied on all four sides so the
/// blurred silhouette is never clipped by the widget's own bounds.
pub struct ShadowLayout {
    dirty_flags: ChangeFlags,
    children: Vec<Box<dyn Widget>>,

    shadowed: bool,
    radius: f32,
    distance: f32,
    angle: f32,
    color: Color,

    dx: f32,
    dy: f32,
    padding: Padding,
    bounds: Rect,

    // Interior mutability: paint takes &self but must be able to rebuild
    // the cache lazily. Single-threaded by construction.
    cache: RefCell<ShadowCache>,
}

pub fn shadow_layout() -> ShadowLayout {
    ShadowLayout::new()
}

impl ShadowLayout {
    pub fn new() -> Self {
        Self::styled(ShadowStyle::default())
    }

    /// Construct from a styled-attribute set, clamping as the setters do.
    pub fn styled(style: ShadowStyle) -> Self {
        let mut layout = Self {
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            children: Vec::new(),
            shadowed: style.shadowed,
            radius: style.radius.max(MIN_RADIUS),
            distance: style.distance,
            angle: style.angle.clamp(MIN_ANGLE, MAX_ANGLE),
            color: style.color,
            dx: 0.0,
            dy: 0.0,
            padding: Padding::default(),
            bounds: Rect::default(),
            cache: RefCell::new(ShadowCache::new()),
        };
        layout.reset_shadow();
        layout
    }

    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(Box::new(widget));
        self.request_layout();
        self
    }

    // Builder forms of the programmatic setters.

    pub fn shadowed(mut self, shadowed: bool) -> Self {
        self.set_shadowed(shadowed);
        self
    }

    pub fn shadow_radius(mut self, radius: f32) -> Self {
        self.set_shadow_radius(radius);
        self
    }

    pub fn shadow_distance(mut self, distance: f32) -> Self {
        self.set_shadow_distance(distance);
        self
    }

    pub fn shadow_angle(mut self, angle: f32) -> Self {
        self.set_shadow_angle(angle);
        self
    }

    pub fn shadow_color(mut self, color: Color) -> Self {
        self.set_shadow_color(color);
        self
    }

    /// Toggle the shadow. Disabling skips compositing entirely; the cache is
    /// neither built nor consulted while off.
    pub fn set_shadowed(&mut self, shadowed: bool) {
        self.shadowed = shadowed;
        self.mark_dirty(ChangeFlags::NEEDS_PAINT);
    }

    /// Set the blur radius. Values ≤ 0 clamp to the minimum of 0.1.
    pub fn set_shadow_radius(&mut self, radius: f32) {
        self.radius = radius.max(MIN_RADIUS);
        self.reset_shadow();
    }

    pub fn set_shadow_distance(&mut self, distance: f32) {
        self.distance = distance;
        self.reset_shadow();
    }

    /// Set the light angle in degrees. Input is clamped into [0, 360].
    pub fn set_shadow_angle(&mut self, angle: f32) {
        self.angle = angle.clamp(MIN_ANGLE, MAX_ANGLE);
        self.reset_shadow();
    }

    /// Set the shadow color. The color's alpha component becomes the shadow
    /// strength.
    pub fn set_shadow_color(&mut self, color: Color) {
        self.color = color;
        self.reset_shadow();
    }

    pub fn is_shadowed(&self) -> bool {
        self.shadowed
    }

    pub fn shadow_radius_value(&self) -> f32 {
        self.radius
    }

    pub fn shadow_distance_value(&self) -> f32 {
        self.distance
    }

    pub fn shadow_angle_value(&self) -> f32 {
        self.angle
    }

    pub fn shadow_color_value(&self) -> Color {
        self.color
    }

    /// The derived pixel offset of the shadow relative to the silhouette.
    pub fn shadow_offset(&self) -> (f32, f32) {
        (self.dx, self.dy)
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// How many times the cached shadow pixmap has been rebuilt.
    pub fn cache_generation(&self) -> u64 {
        self.cache.borrow().generation
    }

    /// Recompute the derived geometry after any configuration change, then
    /// invalidate and ask for a fresh layout pass. All geometry-affecting
    /// setters funnel through here so they behave uniformly.
    fn reset_shadow(&mut self) {
        let angle_rad = self.angle.to_radians();
        self.dx = self.distance * angle_rad.cos();
        self.dy = self.distance * angle_rad.sin() + BASE_OFFSET_Y;

        let pad = (self.distance + self.radius).ceil().max(0.0);
        self.padding = Padding::all(pad);

        self.request_layout();
    }

    fn regenerate(&self, cache: &mut ShadowCache) {
        let width = self.bounds.width.round() as u32;
        let height = self.bounds.height.round() as u32;

        match self.rasterize_shadow(width, height) {
            Some(pixmap) => {
                cache.pixmap = Some(pixmap);
                cache.dirty = false;
                cache.generation += 1;
                log::debug!(
                    "ShadowLayout: regenerated {}x{} shadow cache (generation {})",
                    width,
                    height,
                    cache.generation
                );
            }
            None => {
                // Zero-sized bounds: hold a 1×1 placeholder and stay dirty
                // until a usable size arrives.
                cache.pixmap = Pixmap::new(1, 1);
                log::debug!("ShadowLayout: zero-sized bounds, shadow deferred");
            }
        }
    }

    /// The offscreen pass: child silhouette → blurred mask → tinted pixmap
    /// with the (dx, dy) offset baked in, so compositing is a plain blit at
    /// the widget origin.
    fn rasterize_shadow(&self, width: u32, height: u32) -> Option<Pixmap> {
        let mut scratch =
            PaintContext::with_offset(width, height, -self.bounds.x, -self.bounds.y)?;
        for child in &self.children {
            child.paint(&mut scratch);
        }
        let content = scratch.into_pixmap();

        let mut mask = extract_alpha(&content);
        blur_alpha(&mut mask, width, height, self.radius);
        let tinted = tint_mask(&mask, width, height, self.color)?;

        let mut shadow = PaintContext::new(width, height)?;
        shadow.draw_pixmap(self.dx, self.dy, tinted.as_ref());
        Some(shadow.into_pixmap())
    }
}

impl Default for ShadowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ShadowLayout {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let child_constraints =
            constraints.deflate(self.padding.horizontal(), self.padding.vertical());

        let mut content = Size::zero();
        for child in &mut self.children {
            let child_size = child.layout(child_constraints);
            content.width = content.width.max(child_size.width);
            content.height = content.height.max(child_size.height);
        }

        let size = constraints.constrain(Size::new(
            content.width + self.padding.horizontal(),
            content.height + self.padding.vertical(),
        ));

        // Post-measure hook: a bounds change orphans the cached silhouette.
        if size != self.bounds.size() {
            self.cache.get_mut().dirty = true;
            log::debug!(
                "ShadowLayout: measured {}x{}, shadow cache invalidated",
                size.width,
                size.height
            );
        }
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        // The cache is rasterized in widget-local coordinates, so a pure
        // translation does not invalidate it.
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
        if self.shadowed {
            let mut cache = self.cache.borrow_mut();
            if cache.dirty {
                self.regenerate(&mut cache);
            } else {
                log::trace!("ShadowLayout: reusing cached shadow");
            }
            if let Some(shadow) = &cache.pixmap {
                ctx.draw_pixmap(self.bounds.x, self.bounds.y, shadow.as_ref());
            }
        }
        // Children draw on top of their own shadow.
        for child in &self.children {
            child.paint(ctx);
        }
    }

    fn mark_dirty(&mut self, flags: ChangeFlags) {
        self.dirty_flags |= flags;
    }

    fn needs_layout(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_LAYOUT)
    }

    /// Layout-request interception: invalidate the cache before delegating.
    fn request_layout(&mut self) {
        self.cache.get_mut().dirty = true;
        self.mark_dirty(ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render_root;
    use crate::widgets::block::Block;

    fn shadowed_block() -> ShadowLayout {
        ShadowLayout::styled(ShadowStyle {
            radius: 4.0,
            distance: 6.0,
            ..ShadowStyle::default()
        })
        .child(Block::new(20.0, 10.0, Color::rgb(1.0, 0.0, 0.0)))
    }

    #[test]
    fn test_angle_clamped_into_range() {
        let mut layout = ShadowLayout::new();
        layout.set_shadow_angle(400.0);
        assert_eq!(layout.shadow_angle_value(), 360.0);
        layout.set_shadow_angle(-10.0);
        assert_eq!(layout.shadow_angle_value(), 0.0);
        layout.set_shadow_angle(180.0);
        assert_eq!(layout.shadow_angle_value(), 180.0);
    }

    #[test]
    fn test_radius_clamped_to_minimum() {
        let mut layout = ShadowLayout::new();
        layout.set_shadow_radius(0.0);
        assert_eq!(layout.shadow_radius_value(), 0.1);
        layout.set_shadow_radius(-5.0);
        assert_eq!(layout.shadow_radius_value(), 0.1);
        layout.set_shadow_radius(12.0);
        assert_eq!(layout.shadow_radius_value(), 12.0);
    }

    #[test]
    fn test_styled_clamps_like_setters() {
        let layout = ShadowLayout::styled(ShadowStyle {
            radius: -1.0,
            angle: 700.0,
            ..ShadowStyle::default()
        });
        assert_eq!(layout.shadow_radius_value(), 0.1);
        assert_eq!(layout.shadow_angle_value(), 360.0);
    }

    #[test]
    fn test_offset_derivation() {
        let mut layout = ShadowLayout::new();
        layout.set_shadow_distance(15.0);
        layout.set_shadow_angle(45.0);
        let (dx, dy) = layout.shadow_offset();
        let expected = 15.0 * 45f32.to_radians().sin() + 2.0;
        assert!((dy - expected).abs() < 1e-4);
        assert!((dx - 15.0 * 45f32.to_radians().cos()).abs() < 1e-4);
    }

    #[test]
    fn test_padding_covers_distance_plus_radius() {
        let mut layout = ShadowLayout::new();
        layout.set_shadow_distance(15.0);
        layout.set_shadow_radius(30.0);
        assert_eq!(layout.padding(), Padding::all(45.0));

        layout.set_shadow_distance(2.5);
        layout.set_shadow_radius(1.25);
        assert_eq!(layout.padding(), Padding::all(4.0));
    }

    #[test]
    fn test_consecutive_draws_reuse_cache() {
        let mut layout = shadowed_block();
        render_root(&mut layout, 64, 64).unwrap();
        let generation = layout.cache_generation();
        assert_eq!(generation, 1);
        render_root(&mut layout, 64, 64).unwrap();
        assert_eq!(layout.cache_generation(), generation);
    }

    #[test]
    fn test_config_change_forces_regeneration() {
        let mut layout = shadowed_block();
        render_root(&mut layout, 64, 64).unwrap();
        assert_eq!(layout.cache_generation(), 1);

        layout.set_shadow_color(Color::rgba(0.0, 0.0, 1.0, 0.5));
        render_root(&mut layout, 64, 64).unwrap();
        assert_eq!(layout.cache_generation(), 2);

        layout.set_shadow_radius(8.0);
        render_root(&mut layout, 64, 64).unwrap();
        assert_eq!(layout.cache_generation(), 3);

        layout.set_shadow_distance(3.0);
        render_root(&mut layout, 64, 64).unwrap();
        assert_eq!(layout.cache_generation(), 4);

        layout.set_shadow_angle(90.0);
        render_root(&mut layout, 64, 64).unwrap();
        assert_eq!(layout.cache_generation(), 5);
    }

    #[test]
    fn test_layout_request_invalidates_cache() {
        let mut layout = shadowed_block();
        render_root(&mut layout, 64, 64).unwrap();
        layout.request_layout();
        render_root(&mut layout, 64, 64).unwrap();
        assert_eq!(layout.cache_generation(), 2);
    }

    #[test]
    fn test_zero_bounds_defers_shadow() {
        let mut layout = ShadowLayout::new().child(Block::new(20.0, 10.0, Color::BLACK));
        layout.layout(Constraints::tight(Size::zero()));
        layout.set_origin(0.0, 0.0);

        let mut ctx = PaintContext::new(8, 8).unwrap();
        layout.paint(&mut ctx);
        // Placeholder only, no regeneration counted.
        assert_eq!(layout.cache_generation(), 0);

        // A real measure afterwards produces the shadow.
        layout.layout(Constraints::loose(Size::new(200.0, 200.0)));
        layout.set_origin(0.0, 0.0);
        let mut ctx = PaintContext::new(200, 200).unwrap();
        layout.paint(&mut ctx);
        assert_eq!(layout.cache_generation(), 1);
    }

    #[test]
    fn test_disabled_shadow_builds_no_cache() {
        let mut layout = shadowed_block().shadowed(false);
        render_root(&mut layout, 64, 64).unwrap();
        assert_eq!(layout.cache_generation(), 0);
    }

    #[test]
    fn test_children_drawn_above_shadow() {
        let mut layout = ShadowLayout::styled(ShadowStyle {
            radius: 2.0,
            distance: 2.0,
            color: Color::rgba(0.0, 0.0, 0.0, 1.0),
            ..ShadowStyle::default()
        })
        .child(Block::new(20.0, 20.0, Color::rgb(1.0, 0.0, 0.0)));

        let frame = render_root(&mut layout, 64, 64).unwrap();
        // Center of the child: pure red, not darkened by its own shadow.
        let pad = layout.padding().left as u32;
        let px = frame.pixel(pad + 10, pad + 10).unwrap();
        assert_eq!(px.red(), 255);
        assert_eq!(px.green(), 0);
    }

    #[test]
    fn test_shadow_falls_along_offset() {
        let mut layout = ShadowLayout::styled(ShadowStyle {
            radius: 1.0,
            distance: 8.0,
            angle: 90.0, // straight down
            color: Color::rgba(0.0, 0.0, 0.0, 1.0),
            ..ShadowStyle::default()
        })
        .child(Block::new(20.0, 20.0, Color::WHITE));

        let frame = render_root(&mut layout, 64, 64).unwrap();
        let pad = layout.padding().left as u32;
        // Below the child: shadow coverage. Above: none.
        let below = frame.pixel(pad + 10, pad + 20 + 5).unwrap();
        assert!(below.alpha() > 0);
        let above = frame.pixel(pad + 10, pad.saturating_sub(5)).unwrap();
        assert_eq!(above.alpha(), 0);
    }
}
