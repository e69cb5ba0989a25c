//! Silhouette extraction and tinting for the shadow pass.

use tiny_skia::{IntSize, Pixmap};

use crate::widgets::Color;

/// Pull the coverage (alpha) channel out of a premultiplied pixmap.
pub fn extract_alpha(pixmap: &Pixmap) -> Vec<u8> {
    pixmap.pixels().iter().map(|px| px.alpha()).collect()
}

/// Expand an A8 mask into a premultiplied RGBA pixmap tinted with `color`.
///
/// Coverage is weighted by the color's own alpha, so a half-transparent
/// shadow color yields a half-strength shadow. Returns `None` only for a
/// zero-sized mask.
pub fn tint_mask(mask: &[u8], width: u32, height: u32, color: Color) -> Option<Pixmap> {
    debug_assert_eq!(mask.len(), width as usize * height as usize);
    let size = IntSize::from_wh(width, height)?;

    let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    let (cr, cg, cb, ca) = (ch(color.r), ch(color.g), ch(color.b), ch(color.a));

    let mut data = Vec::with_capacity(mask.len() * 4);
    for &m in mask {
        let a = mul_div255(m, ca);
        data.extend_from_slice(&[
            mul_div255(cr, a),
            mul_div255(cg, a),
            mul_div255(cb, a),
            a,
        ]);
    }
    Pixmap::from_vec(data, size)
}

fn mul_div255(a: u8, b: u8) -> u8 {
    ((u16::from(a) * u16::from(b) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::PaintContext;
    use crate::widgets::Rect;

    #[test]
    fn test_extract_alpha_reads_coverage() {
        let mut ctx = PaintContext::new(4, 4).unwrap();
        ctx.fill_rect(Rect::new(0.0, 0.0, 2.0, 4.0), Color::rgba(0.2, 0.4, 0.6, 1.0));
        let mask = extract_alpha(ctx.pixmap());
        assert_eq!(mask[0], 255);
        assert_eq!(mask[3], 0);
        // Coverage only: the fill color's RGB does not matter.
        let mut ctx2 = PaintContext::new(4, 4).unwrap();
        ctx2.fill_rect(Rect::new(0.0, 0.0, 2.0, 4.0), Color::WHITE);
        assert_eq!(mask, extract_alpha(ctx2.pixmap()));
    }

    #[test]
    fn test_tint_mask_applies_color_alpha() {
        let mask = vec![255u8, 0, 128, 255];
        let shadow = tint_mask(&mask, 2, 2, Color::rgba(1.0, 0.0, 0.0, 0.5)).unwrap();
        let full = shadow.pixel(0, 0).unwrap();
        // Full coverage × 50% color alpha ≈ 128.
        assert!((i32::from(full.alpha()) - 128).abs() <= 1);
        assert_eq!(full.red(), full.alpha()); // premultiplied pure red
        assert_eq!(shadow.pixel(1, 0).unwrap().alpha(), 0);
    }

    #[test]
    fn test_tint_mask_rejects_zero_size() {
        assert!(tint_mask(&[], 0, 0, Color::BLACK).is_none());
    }

    #[test]
    fn test_mul_div255_bounds() {
        assert_eq!(mul_div255(255, 255), 255);
        assert_eq!(mul_div255(0, 255), 0);
        assert_eq!(mul_div255(255, 128), 128);
    }
}
