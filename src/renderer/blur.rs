//! Separable gaussian blur over a single-channel coverage mask.
//!
//! Weights are fixed-point Q16 so the two passes stay in integer arithmetic.
//! Sampling clamps at the edges, which keeps the silhouette from darkening
//! toward the border of the offscreen pixmap.

const Q16_ONE: i64 = 65536;

/// Blur `mask` (A8, row-major, `width`×`height`) in place.
///
/// The kernel radius is `ceil(radius)` with σ = radius/2, so coverage never
/// spreads further than `radius` pixels, the caller's padding budget.
/// A radius that rounds to zero is a no-op.
pub fn blur_alpha(mask: &mut [u8], width: u32, height: u32, radius: f32) {
    debug_assert_eq!(mask.len(), width as usize * height as usize);
    let kernel = gaussian_kernel_q16(radius);
    if kernel.len() <= 1 || mask.is_empty() {
        return;
    }

    let mut tmp = vec![0u8; mask.len()];
    horizontal_pass(mask, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, mask, width, height, &kernel);
}

/// Build a normalized gaussian kernel in Q16. The rounding residual is folded
/// into the center tap so the weights always sum to exactly one.
fn gaussian_kernel_q16(radius: f32) -> Vec<u32> {
    let r = radius.max(0.0).ceil() as i32;
    if r == 0 {
        return vec![Q16_ONE as u32];
    }
    let sigma = f64::from(radius / 2.0).max(0.5);
    let denom = 2.0 * sigma * sigma;

    let mut weights_f = Vec::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * Q16_ONE as f64).round() as i64;
        let q = q.clamp(0, Q16_ONE);
        weights.push(q as u32);
        acc += q;
    }
    let delta = Q16_ONE - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let fixed = (i64::from(weights[mid]) + delta).clamp(0, Q16_ONE);
        weights[mid] = fixed as u32;
    }

    weights
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        let row = (y * w) as usize;
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                acc += u64::from(kw) * u64::from(src[row + sx as usize]);
            }
            dst[row + x as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}
