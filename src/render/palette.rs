use super::Color;

/// Categorical series colors, cycled by series index.
const SERIES_PALETTE: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

#[must_use]
pub fn series_color(index: usize) -> Color {
    let (red, green, blue) = SERIES_PALETTE[index % SERIES_PALETTE.len()];
    Color::rgb8(red, green, blue)
}

/// Translucent fill of the drag-selection box.
pub const SELECTION_FILL: Color = Color::rgba(0.2, 0.4, 0.9, 0.15);
pub const SELECTION_BORDER: Color = Color::rgba(0.2, 0.4, 0.9, 0.8);
