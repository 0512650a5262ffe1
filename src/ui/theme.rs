#![allow(dead_code)]
use ratatui::prelude::Color;

// Catppuccin Macchiato palette
pub const BASE: Color = Color::Rgb(36, 39, 58);
pub const SURFACE0: Color = Color::Rgb(54, 58, 79);
pub const SURFACE1: Color = Color::Rgb(73, 77, 100);
pub const SURFACE2: Color = Color::Rgb(91, 96, 120);
pub const TEXT: Color = Color::Rgb(202, 211, 245);
pub const SUBTEXT0: Color = Color::Rgb(165, 173, 203);
pub const OVERLAY0: Color = Color::Rgb(110, 115, 141);
pub const RED: Color = Color::Rgb(237, 135, 150);
pub const GREEN: Color = Color::Rgb(166, 218, 149);
pub const YELLOW: Color = Color::Rgb(238, 212, 159);
pub const BLUE: Color = Color::Rgb(138, 173, 244);
pub const TEAL: Color = Color::Rgb(139, 213, 202);
pub const MAUVE: Color = Color::Rgb(198, 160, 246);
pub const PEACH: Color = Color::Rgb(245, 169, 127);
