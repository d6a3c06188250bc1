use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const PRICE: Color = Color::TrueColor { r: 180, g: 230, b: 160 };
pub const CUT: Color = Color::Green;
pub const NO_CUT: Color = Color::Yellow;
pub const OUT_OF_RANGE: Color = Color::BrightBlack;
