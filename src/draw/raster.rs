//! Pixel buffer backing the drawing surface, and immutable copies of it.

use super::color::Color;
use cairo::{Context, Format, ImageSurface, Operator};
use std::fmt;
use thiserror::Error;

/// Pixel format of every raster. Cairo stores it premultiplied, one native-endian
/// `u32` per pixel (`0xAARRGGBB`).
pub const RASTER_FORMAT: Format = Format::ARgb32;

/// Errors raised while creating or manipulating a raster.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface pixels are not accessible: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),
}

/// The drawable pixel buffer and the background it was created with.
pub struct Raster {
    surface: ImageSurface,
    background: Color,
}

impl Raster {
    /// Allocates a `width` x `height` raster. The caller paints the background.
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self, SurfaceError> {
        if width <= 0 || height <= 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        let surface = ImageSurface::create(RASTER_FORMAT, width, height)?;
        Ok(Self {
            surface,
            background,
        })
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Replaces every pixel with the background color through `ctx`.
    pub fn fill_background(&self, ctx: &Context) -> Result<(), SurfaceError> {
        ctx.save()?;
        ctx.set_operator(Operator::Source);
        self.background.apply(ctx);
        let painted = ctx.paint();
        ctx.restore()?;
        painted?;
        Ok(())
    }

    /// Copies the current pixels into an owned [`Snapshot`].
    pub fn snapshot(&self) -> Result<Snapshot, SurfaceError> {
        let width = self.width();
        let height = self.height();
        let mut copy = ImageSurface::create(RASTER_FORMAT, width, height)?;
        {
            let ctx = Context::new(&copy)?;
            ctx.set_operator(Operator::Source);
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.paint()?;
        }
        copy.flush();
        let stride = copy.stride();
        let data = copy.data()?.to_vec();

        Ok(Snapshot {
            width,
            height,
            stride,
            format: RASTER_FORMAT,
            data,
        })
    }

    /// Overwrites the raster with the snapshot's pixels, discarding whatever was
    /// drawn since it was taken.
    pub fn restore(&self, ctx: &Context, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        let source = ImageSurface::create_for_data(
            snapshot.data.clone(),
            snapshot.format,
            snapshot.width,
            snapshot.height,
            snapshot.stride,
        )?;

        ctx.save()?;
        ctx.set_operator(Operator::Source);
        let painted = ctx
            .set_source_surface(&source, 0.0, 0.0)
            .and_then(|()| ctx.paint());
        ctx.restore()?;
        painted?;
        Ok(())
    }

    /// Encodes the current pixels as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.surface.flush();
        let mut buffer = Vec::new();
        self.surface.write_to_png(&mut buffer)?;
        Ok(buffer)
    }
}

/// Immutable capture of a raster's pixel buffer.
///
/// Holds width, height, row stride, pixel format (the color space stand-in)
/// and the raw pixel bytes.
#[derive(Clone)]
pub struct Snapshot {
    width: i32,
    height: i32,
    stride: i32,
    format: Format,
    data: Vec<u8>,
}

impl Snapshot {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied `0xAARRGGBB` value at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let row = usize::try_from(y).ok()?.checked_mul(usize::try_from(self.stride).ok()?)?;
        let offset = row.checked_add(usize::try_from(x).ok()? * 4)?;
        let bytes: [u8; 4] = self.data.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
        Some(u32::from_ne_bytes(bytes))
    }

    /// Number of pixels whose value differs from `other`.
    ///
    /// Snapshots of different sizes are considered entirely different.
    pub fn diff_count(&self, other: &Snapshot) -> usize {
        if self.width != other.width || self.height != other.height {
            return (self.width.max(other.width) * self.height.max(other.height)) as usize;
        }
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x, y) != other.pixel(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Pixels inside the buffer that differ from `value`, as (x, y) pairs.
    pub fn pixels_not_equal_to(&self, value: u32) -> Vec<(i32, i32)> {
        let mut found = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x, y) != Some(value) {
                    found.push((x, y));
                }
            }
        }
        found
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.stride == other.stride
            && self.data == other.data
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}
