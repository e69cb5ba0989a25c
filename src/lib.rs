//! `umbra`: a cached drop-shadow container for CPU-rasterized widget trees.
//!
//! The centerpiece is [`widgets::ShadowLayout`]: a container that rasterizes
//! its children's silhouette into an offscreen pixmap, blurs the alpha
//! channel, and composites the tinted result beneath the normal child-draw
//! pass. The offscreen pixmap is cached and invalidated by configuration
//! changes, bounds changes, and layout requests.
//!
//! ```no_run
//! use umbra::prelude::*;
//!
//! let mut scene = container()
//!     .background(Color::WHITE)
//!     .child(
//!         shadow_layout()
//!             .shadow_radius(12.0)
//!             .shadow_distance(6.0)
//!             .child(block(120.0, 80.0, Color::from_hex(0x3F51B5))),
//!     );
//!
//! let frame = render_root(&mut scene, 320, 240).expect("non-zero frame");
//! save_png(&frame, "scene.png").expect("write png");
//! ```

pub mod invalidation;
pub mod layout;
pub mod renderer;
pub mod widgets;

pub mod prelude {
    pub use crate::invalidation::ChangeFlags;
    pub use crate::layout::{Constraints, Size};
    pub use crate::renderer::{render_root, save_png, to_rgba_image, PaintContext};
    pub use crate::widgets::{
        block, container, shadow_layout, Block, Color, Container, Padding, Rect, ShadowLayout,
        ShadowStyle, Widget,
    };
}
