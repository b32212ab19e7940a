//! Built-in 5x7 bitmap font for numeric labels.

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Rows top to bottom; bit 4 is the leftmost column.
const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

pub fn glyph(c: char) -> Option<&'static [u8; 7]> {
    c.to_digit(10).map(|d| &DIGITS[d as usize])
}

/// Whether the glyph pixel at (`col`, `row`) is set.
pub fn is_set(rows: &[u8; 7], col: u32, row: u32) -> bool {
    col < GLYPH_WIDTH && row < GLYPH_HEIGHT && rows[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}

/// Pixel size of `text` at `scale`, with one scaled column between glyphs.
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let count = text.chars().filter(|c| glyph(*c).is_some()).count() as u32;
    if count == 0 {
        return (0, 0);
    }
    let width = (count * GLYPH_WIDTH + (count - 1)) * scale;
    (width, GLYPH_HEIGHT * scale)
}
