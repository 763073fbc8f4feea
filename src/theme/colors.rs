//! Colors - Console Palette

use gpui::{Rgba, rgb, rgba};

use crate::table::Tone;

/// Console palette; every color is an associated function
pub struct Palette;

impl Palette {
    // Brand
    /// Header background - Indigo
    pub fn header_bg() -> Rgba { rgb(0x312e81) }
    /// Primary accent for main buttons
    pub fn accent() -> Rgba { rgb(0x4f46e5) }
    /// Accent at low alpha, used for the active nav item
    pub fn accent_soft() -> Rgba { rgba(0x4f46e522) }

    // Background colors
    pub fn background() -> Rgba { rgb(0xf3f4f6) }
    pub fn content_bg() -> Rgba { rgb(0xffffff) }
    pub fn sidebar_bg() -> Rgba { rgb(0xffffff) }
    /// Modal backdrop
    pub fn overlay() -> Rgba { rgba(0x00000088) }

    // Text colors
    pub fn text_primary() -> Rgba { rgb(0x111827) }
    pub fn text_secondary() -> Rgba { rgb(0x6b7280) }
    pub fn text_muted() -> Rgba { rgb(0x9ca3af) }
    /// Text on the header and on filled buttons
    pub fn text_light() -> Rgba { rgb(0xffffff) }

    // Status colors
    pub fn success() -> Rgba { rgb(0x16a34a) }
    pub fn warning() -> Rgba { rgb(0xd97706) }
    pub fn danger() -> Rgba { rgb(0xdc2626) }
    pub fn info() -> Rgba { rgb(0x2563eb) }
    /// Error banner background
    pub fn danger_soft() -> Rgba { rgb(0xfef2f2) }

    // Border colors
    pub fn border() -> Rgba { rgb(0xe5e7eb) }
    pub fn border_focus() -> Rgba { rgb(0x4f46e5) }

    // Button colors
    pub fn button_primary_bg() -> Rgba { rgb(0x4f46e5) }
    pub fn button_primary_hover() -> Rgba { rgb(0x4338ca) }
    pub fn button_secondary_bg() -> Rgba { rgb(0xe5e7eb) }
    pub fn button_secondary_hover() -> Rgba { rgb(0xd1d5db) }
    pub fn button_danger_bg() -> Rgba { rgb(0xdc2626) }
    pub fn button_danger_hover() -> Rgba { rgb(0xb91c1c) }
    pub fn button_ghost_text() -> Rgba { rgb(0x6b7280) }

    // Table colors
    pub fn table_header_bg() -> Rgba { rgb(0xf9fafb) }
    pub fn table_row_hover() -> Rgba { rgb(0xf3f4f6) }
    pub fn table_row_alt() -> Rgba { rgb(0xf9fafb) }

    // Input colors
    pub fn input_bg() -> Rgba { rgb(0xffffff) }
    pub fn input_border() -> Rgba { rgb(0xd1d5db) }
    pub fn input_placeholder() -> Rgba { rgb(0x9ca3af) }
}

impl Palette {
    /// Foreground and background of a badge
    pub fn tone(tone: Tone) -> (Rgba, Rgba) {
        match tone {
            Tone::Neutral => (Self::text_secondary(), rgb(0xf3f4f6)),
            Tone::Success => (Self::success(), rgb(0xdcfce7)),
            Tone::Warning => (Self::warning(), rgb(0xfef3c7)),
            Tone::Danger => (Self::danger(), rgb(0xfee2e2)),
            Tone::Info => (Self::info(), rgb(0xdbeafe)),
        }
    }
}
