pub mod block;
pub mod container;
pub mod shadow_layout;
pub mod widget;

/// Macro to implement common dirty flag methods for simple widgets.
///
/// ShadowLayout keeps a custom implementation because marking it dirty must
/// also invalidate its cached shadow pixmap.
macro_rules! impl_dirty_flags {
    () => {
        fn mark_dirty(&mut self, flags: crate::invalidation::ChangeFlags) {
            self.dirty_flags |= flags;
        }
        fn needs_layout(&self) -> bool {
            self.dirty_flags
                .contains(crate::invalidation::ChangeFlags::NEEDS_LAYOUT)
        }
    };
}
pub(crate) use impl_dirty_flags;

pub use block::{block, Block};
pub use container::{container, Container};
pub use shadow_layout::{shadow_layout, ShadowLayout, ShadowStyle};
pub use widget::{Color, Padding, Rect, Widget};
