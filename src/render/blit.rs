use crate::foundation::core::{PixelBuffer, Rgba8};

/// How the canvas is cleared before sources are painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundMode {
    /// Opaque fill with the configured background color.
    Opaque(Rgba8),
    /// True per-pixel transparency (alpha-native preview or encoder).
    AlphaClear,
    /// Opaque fill with the reserved chroma-key color, for encoders without
    /// a native alpha channel.
    ChromaKey(Rgba8),
}

/// Clear the whole surface according to `mode`.
pub fn paint_background(surface: &mut PixelBuffer, mode: BackgroundMode) {
    let px = match mode {
        BackgroundMode::Opaque(c) | BackgroundMode::ChromaKey(c) => c.to_premul(),
        BackgroundMode::AlphaClear => [0, 0, 0, 0],
    };
    surface.fill(px);
}

/// Premultiplied source-over for a single pixel.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Paint `frame` onto `surface` at `(x, y)` scaled by `draw_scale`.
///
/// Scaling is nearest-neighbour at the frame's aspect-preserved draw size
/// (`max(1, round(native * scale))` per axis, matching the preview path);
/// positions round to whole output pixels. Pixels falling outside the
/// surface are clipped. Later blits occlude earlier ones wherever the source
/// pixel is opaque.
pub fn draw_frame(surface: &mut PixelBuffer, frame: &PixelBuffer, x: f64, y: f64, draw_scale: f64) {
    let src_w = i64::from(frame.width());
    let src_h = i64::from(frame.height());
    if src_w == 0 || src_h == 0 || draw_scale <= 0.0 {
        return;
    }

    let draw_w = ((f64::from(frame.width()) * draw_scale).round() as i64).max(1);
    let draw_h = ((f64::from(frame.height()) * draw_scale).round() as i64).max(1);
    let origin_x = x.round() as i64;
    let origin_y = y.round() as i64;

    let out_w = i64::from(surface.width());
    let out_h = i64::from(surface.height());

    for dy in 0..draw_h {
        let ty = origin_y + dy;
        if ty < 0 || ty >= out_h {
            continue;
        }
        let sy = (dy * src_h / draw_h).min(src_h - 1) as u32;
        for dx in 0..draw_w {
            let tx = origin_x + dx;
            if tx < 0 || tx >= out_w {
                continue;
            }
            let sx = (dx * src_w / draw_w).min(src_w - 1) as u32;
            let src = frame.pixel(sx, sy);
            if src[3] == 0 {
                continue;
            }
            let dst = surface.pixel(tx as u32, ty as u32);
            surface.set_pixel(tx as u32, ty as u32, over(dst, src));
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
