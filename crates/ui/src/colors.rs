//! The static color palette.
//!
//! Colors are stored as `0xRRGGBB` values so they can live in `const` items,
//! use [`hsla`] (or [`gpui::rgb`]) to turn one into a paintable color.
use gpui::{Hsla, rgb};

/// Default progress color.
pub const PRIMARY: u32 = 0x111827;
/// Default track (background) color.
pub const TRACK: u32 = 0xE5E7EB;
/// Default buffer color of the linear progress.
pub const BUFFER: u32 = 0x9CA3AF;
pub const WHITE: u32 = 0xFFFFFF;
pub const BLACK: u32 = 0x000000;

/// The neutral gray scale, keyed by shade level (50..=900).
pub const NEUTRAL: [(u16, u32); 10] = [
    (50, 0xF9FAFB),
    (100, 0xF3F4F6),
    (200, 0xE5E7EB),
    (300, 0xD1D5DB),
    (400, 0x9CA3AF),
    (500, 0x6B7280),
    (600, 0x4B5563),
    (700, 0x374151),
    (800, 0x1F2937),
    (900, 0x111827),
];

/// A light/main/dark triple of one semantic color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shades {
    pub light: u32,
    pub main: u32,
    pub dark: u32,
}

impl Shades {
    pub fn light(&self) -> Hsla {
        hsla(self.light)
    }

    pub fn main(&self) -> Hsla {
        hsla(self.main)
    }

    pub fn dark(&self) -> Hsla {
        hsla(self.dark)
    }
}

pub const SUCCESS: Shades = Shades {
    light: 0x34D399,
    main: 0x10B981,
    dark: 0x059669,
};

pub const WARNING: Shades = Shades {
    light: 0xFBBF24,
    main: 0xF59E0B,
    dark: 0xD97706,
};

pub const DANGER: Shades = Shades {
    light: 0xF87171,
    main: 0xEF4444,
    dark: 0xDC2626,
};

pub const INFO: Shades = Shades {
    light: 0x60A5FA,
    main: 0x3B82F6,
    dark: 0x2563EB,
};

/// A four stop gradient that suits the liquid progress.
pub const LIQUID_GRADIENT: [u32; 4] = [0x4F46E5, 0x7C3AED, 0xEC4899, 0xF59E0B];

/// Convert a `0xRRGGBB` value into [`Hsla`].
#[inline]
pub fn hsla(hex: u32) -> Hsla {
    rgb(hex).into()
}

/// Returns the neutral color of the given shade level, e.g. `neutral(500)`.
pub fn neutral(level: u16) -> Option<Hsla> {
    NEUTRAL
        .iter()
        .find(|(shade, _)| *shade == level)
        .map(|(_, hex)| hsla(*hex))
}

/// The liquid gradient as paintable colors.
pub fn liquid_gradient() -> Vec<Hsla> {
    LIQUID_GRADIENT.iter().copied().map(hsla).collect()
}
