//! Named colors and packed-color helpers.
//!
//! Colors are passed around as packed `0xRRGGBB` integers. Bits above the
//! low 24 are ignored everywhere. [`unpack`] and [`pack`] convert to and from
//! `palette::Srgb<u8>` for per-channel access.

use palette::Srgb;

pub const BLACK: u32 = 0x000000;
pub const RED: u32 = 0xFF0000;
pub const GREEN: u32 = 0x00FF00;
pub const BLUE: u32 = 0x0000FF;
pub const YELLOW: u32 = 0xFFFF00;
pub const CYAN: u32 = 0x00FFFF;
pub const MAGENTA: u32 = 0xFF00FF;
pub const ORANGE: u32 = 0xFFA500;
pub const WHITE: u32 = 0xFFFFFF;

/// Mask selecting the 24 color bits of a packed value.
pub const COLOR_MASK: u32 = 0xFF_FFFF;

/// Splits a packed color into its three 8-bit channels.
#[inline]
pub const fn unpack(color: u32) -> Srgb<u8> {
    Srgb::new(
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Packs three 8-bit channels into `0xRRGGBB`.
#[inline]
pub const fn pack(color: Srgb<u8>) -> u32 {
    ((color.red as u32) << 16) | ((color.green as u32) << 8) | color.blue as u32
}
