//! Color and depth buffers.
//!
//! [`RenderTarget`] owns one frame's worth of packed BGRA colors and depth
//! values. Drawing goes through [`FrameBuffer`], a bounds-checked view over a
//! horizontal band of rows. Splitting the target into disjoint bands lets
//! workers draw in parallel without ever sharing a pixel.

use std::ops::Range;

use image::RgbaImage;
use rayon::prelude::*;

use crate::colors::{self, unpack_color};

/// Rows per parallel band.
pub const TILE_ROWS: u32 = 32;

/// Owned color + depth buffers for one canvas.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![f32::INFINITY; size],
            width,
            height,
        }
    }

    /// Reallocates both buffers. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Resets every depth value to `far`.
    pub fn clear_depth(&mut self, far: f32) {
        self.depth_buffer.fill(far);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let in_bounds = x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height;
        in_bounds.then(|| y as usize * self.width as usize + x as usize)
    }

    /// Color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.color_buffer[i])
    }

    /// Depth at (x, y), or None if out of bounds.
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth_buffer[i])
    }

    /// Row-major packed BGRA pixels.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Pixels as little-endian bytes (`B, G, R, A` per pixel).
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect()
    }

    /// Copies the frame into an RGBA image for encoding.
    pub fn to_image(&self) -> RgbaImage {
        let raw = self
            .color_buffer
            .iter()
            .flat_map(|&c| {
                let (r, g, b, a) = unpack_color(c);
                [r, g, b, a]
            })
            .collect();
        // Length is width * height * 4 by construction.
        RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// View over the whole target.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            0,
        )
    }

    /// Splits the target into disjoint bands of [`TILE_ROWS`] rows, drawn in
    /// parallel.
    pub fn par_bands(&mut self) -> impl IndexedParallelIterator<Item = FrameBuffer<'_>> {
        let width = self.width;
        let chunk = (width as usize * TILE_ROWS as usize).max(1);
        self.color_buffer
            .par_chunks_mut(chunk)
            .zip(self.depth_buffer.par_chunks_mut(chunk))
            .enumerate()
            .map(move |(i, (color, depth))| {
                FrameBuffer::new(color, depth, width, i as u32 * TILE_ROWS)
            })
    }
}

/// Mutable view over consecutive full rows of a [`RenderTarget`].
///
/// Coordinates are in canvas space; writes outside the view's rows or columns
/// are ignored.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    first_row: u32,
    rows: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Wraps slices holding whole rows starting at canvas row `first_row`.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        first_row: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            depth_buffer.len(),
            "Color and depth buffers differ in size"
        );
        let rows = if width == 0 {
            0
        } else {
            debug_assert_eq!(color_buffer.len() % width as usize, 0);
            (color_buffer.len() / width as usize) as u32
        };
        Self {
            color_buffer,
            depth_buffer,
            width,
            first_row,
            rows,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas rows covered by this view.
    pub fn rows(&self) -> Range<i64> {
        let start = self.first_row as i64;
        start..start + self.rows as i64
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let local_y = y - self.first_row as i64;
        let in_bounds =
            x >= 0 && x < self.width as i64 && local_y >= 0 && local_y < self.rows as i64;
        in_bounds.then(|| local_y as usize * self.width as usize + x as usize)
    }

    /// Writes a pixel without depth testing.
    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.color_buffer[i] = color;
        }
    }

    /// Writes a pixel if `depth` is strictly nearer than the stored depth.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i64, y: i64, depth: f32, color: u32) {
        if let Some(i) = self.index(x, y) {
            if depth < self.depth_buffer[i] {
                self.depth_buffer[i] = depth;
                self.color_buffer[i] = color;
            }
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<u32> {
        self.index(x, y).map(|i| self.color_buffer[i])
    }
}
