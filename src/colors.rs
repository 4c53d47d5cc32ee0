//! Packed 32-bit colors.
//!
//! Colors are stored as `u32` with blue in the lowest byte:
//! `A << 24 | R << 16 | G << 8 | B`. In little-endian memory this reads as
//! `B, G, R, A`, the layout display layers expect for BGRA surfaces.

pub const BLACK: u32 = 0xFF00_0000;
pub const WHITE: u32 = 0xFFFF_FFFF;
pub const AQUA: u32 = 0xFF00_FFFF;
pub const GRAY: u32 = 0xFF80_8080;

/// Default clear color.
pub const BACKGROUND: u32 = BLACK;
/// Default wireframe / fill color.
pub const FOREGROUND: u32 = WHITE;
/// Selection bounding box color.
pub const HIGHLIGHT: u32 = AQUA;

#[inline]
pub const fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits a packed color into `(r, g, b, a)`.
#[inline]
pub const fn unpack_color(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    )
}

/// Scales the RGB channels by `intensity`, keeping alpha.
///
/// Channels are truncated toward zero; `intensity` is expected in `[0, 1]`.
#[inline]
pub fn modulate(color: u32, intensity: f32) -> u32 {
    let (r, g, b, a) = unpack_color(color);
    let scale = |c: u8| (c as f32 * intensity) as u8;
    pack_color(scale(r), scale(g), scale(b), a)
}

/// Parses `RRGGBB` or `AARRGGBB` hex, with an optional leading `#`.
pub fn parse_hex(text: &str) -> Option<u32> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    let value = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        6 => Some(0xFF00_0000 | value),
        8 => Some(value),
        _ => None,
    }
}
