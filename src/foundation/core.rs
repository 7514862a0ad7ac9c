use crate::foundation::error::{GridError, GridResult};

pub use kurbo::{Point, Rect, Vec2};

/// Minimum per-frame delay accepted from a decoder, in milliseconds.
///
/// Zero-duration frames would divide the timeline by zero and make playback
/// timers spin; decoders floor to this value instead.
pub const MIN_FRAME_DELAY_MS: u32 = 20;

/// Minimum output tick length in milliseconds, regardless of requested fps.
pub const MIN_TICK_MS: u32 = 10;

/// Reserved chroma-key color substituted for true alpha when the target
/// encoder has no native alpha channel.
pub const CHROMA_KEY: Rgba8 = Rgba8 {
    r: 0x00,
    g: 0xff,
    b: 0x00,
    a: 0xff,
};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the default grid background.
    pub const WHITE: Self = Self::opaque(0xff, 0xff, 0xff);

    /// Build an opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Convert to a premultiplied RGBA8 pixel.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            ((u16::from(c) * u16::from(a) + 127) / 255) as u8
        }
        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

/// Owned premultiplied RGBA8 raster.
///
/// The pixel vector length is always exactly `width * height * 4`.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap already-premultiplied RGBA8 bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> GridResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GridError::validation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(GridError::validation(format!(
                "pixel buffer length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Premultiply straight RGBA8 bytes in place and wrap them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> GridResult<Self> {
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                continue;
            }
            px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
            px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
            px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
        }
        Self::new(width, height, data)
    }

    /// Allocate a buffer filled with one premultiplied pixel value.
    pub fn filled(width: u32, height: u32, px: [u8; 4]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Allocate a fully transparent buffer.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel. Caller must stay in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Write one pixel. Caller must stay in bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Overwrite every pixel with `px`.
    pub fn fill(&mut self, px: [u8; 4]) {
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Exact pixel equality, no tolerance.
    ///
    /// Compares 4-byte words rather than individual bytes and short-circuits
    /// on a length mismatch before touching content.
    pub fn content_eq(&self, other: &Self) -> bool {
        if self.data.len() != other.data.len() {
            return false;
        }
        self.data
            .chunks_exact(4)
            .zip(other.data.chunks_exact(4))
            .all(|(a, b)| {
                u32::from_ne_bytes([a[0], a[1], a[2], a[3]])
                    == u32::from_ne_bytes([b[0], b[1], b[2], b[3]])
            })
    }

    /// Un-premultiply into straight RGBA8 bytes (for encoders that expect
    /// straight alpha).
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            px[0] = ((u32::from(px[0]) * 255 + a / 2) / a).min(255) as u8;
            px[1] = ((u32::from(px[1]) * 255 + a / 2) / a).min(255) as u8;
            px[2] = ((u32::from(px[2]) * 255 + a / 2) / a).min(255) as u8;
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}
