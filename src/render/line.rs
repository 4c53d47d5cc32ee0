//! Integer line drawing.

use super::framebuffer::FrameBuffer;

/// Draws a line from (x0, y0) to (x1, y1) with Bresenham's algorithm.
///
/// Only integer arithmetic is used. The error term starts at `dx - dy`; each
/// step moves along x when `2 * err > -dy` and along y when `2 * err < dx`,
/// both for a diagonal step. Every sample is clipped individually, so a
/// line that leaves the buffer still draws its visible part.
///
/// Stepping stops early once the line has left the rows owned by `buffer`
/// and is moving away from them.
pub fn draw_line(buffer: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let rows = buffer.rows();
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    if y0.max(y1) < rows.start || y0.min(y1) >= rows.end {
        return;
    }

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let (mut x, mut y) = (x0, y0);
    loop {
        buffer.set_pixel(x, y, color);

        if x == x1 && y == y1 {
            break;
        }
        if (sy > 0 && y >= rows.end) || (sy < 0 && y < rows.start) {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
