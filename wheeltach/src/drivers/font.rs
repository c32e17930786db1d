//! Glyph tables for the PCD8544 display.
//!
//! The small font is the classic Sparkfun 5x8 table used by virtually every
//! Nokia 5110 driver: one byte per column, LSB at the top, covering ASCII
//! 0x20..=0x7F (0x7E/0x7F hold left/right arrows). Codes outside that range
//! render as a filled block so mistakes are visible on the glass.
//!
//! The big glyphs are 8 columns wide and span two DDRAM banks (16 pixel
//! rows). Rather than hand-copying bitmap tables, they are generated at
//! compile time from seven-segment stroke masks, which is all a speed
//! readout needs: digits, decimal point, minus and colon.

/// Columns per small glyph as stored (padding columns are added on output).
pub const GLYPH_COLS: usize = 5;

/// Filled block shown for characters the table does not cover.
const FALLBACK: [u8; GLYPH_COLS] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

/// Look up the 5x8 glyph for an ASCII byte.
pub fn glyph(c: u8) -> &'static [u8; GLYPH_COLS] {
    match c {
        0x20..=0x7F => &ASCII_5X8[(c - 0x20) as usize],
        _ => &FALLBACK,
    }
}

#[rustfmt::skip]
static ASCII_5X8: [[u8; GLYPH_COLS]; 96] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x10, 0x08, 0x08, 0x10, 0x08], // left arrow
    [0x78, 0x46, 0x41, 0x46, 0x78], // right arrow
];

/// Columns per big glyph as stored.
pub const BIG_GLYPH_COLS: usize = 8;

/// Big glyph storage: `[column][bank]`, bank 0 holds pixel rows 0..8.
pub type BigGlyph = [[u8; 2]; BIG_GLYPH_COLS];

// Seven-segment stroke bits for the generated big digits.
const SEG_A: u8 = 1 << 0; // top bar
const SEG_B: u8 = 1 << 1; // upper right
const SEG_C: u8 = 1 << 2; // lower right
const SEG_D: u8 = 1 << 3; // bottom bar
const SEG_E: u8 = 1 << 4; // lower left
const SEG_F: u8 = 1 << 5; // upper left
const SEG_G: u8 = 1 << 6; // middle bar

/// Render a stroke mask into a two-bank glyph. Bars are two pixels thick;
/// verticals fill the left/right two-column edges.
const fn stroke_glyph(segs: u8) -> BigGlyph {
    let mut glyph = [[0u8; 2]; BIG_GLYPH_COLS];
    let mut col = 0;
    while col < BIG_GLYPH_COLS {
        let left = col < 2;
        let right = col >= BIG_GLYPH_COLS - 2;
        let mut upper = 0u8;
        let mut lower = 0u8;

        if segs & SEG_A != 0 {
            upper |= 0x03; // rows 0-1
        }
        if segs & SEG_D != 0 {
            lower |= 0xC0; // rows 14-15
        }
        if segs & SEG_G != 0 {
            upper |= 0x80; // row 7
            lower |= 0x01; // row 8
        }
        if left && segs & SEG_F != 0 {
            upper |= 0xFF;
            lower |= 0x01;
        }
        if left && segs & SEG_E != 0 {
            upper |= 0x80;
            lower |= 0xFF;
        }
        if right && segs & SEG_B != 0 {
            upper |= 0xFF;
            lower |= 0x01;
        }
        if right && segs & SEG_C != 0 {
            upper |= 0x80;
            lower |= 0xFF;
        }

        glyph[col][0] = upper;
        glyph[col][1] = lower;
        col += 1;
    }
    glyph
}

const fn digit_strokes(digit: u8) -> u8 {
    match digit {
        0 => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        1 => SEG_B | SEG_C,
        2 => SEG_A | SEG_B | SEG_G | SEG_E | SEG_D,
        3 => SEG_A | SEG_B | SEG_G | SEG_C | SEG_D,
        4 => SEG_F | SEG_G | SEG_B | SEG_C,
        5 => SEG_A | SEG_F | SEG_G | SEG_C | SEG_D,
        6 => SEG_A | SEG_F | SEG_G | SEG_E | SEG_C | SEG_D,
        7 => SEG_A | SEG_B | SEG_C,
        8 => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        _ => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
    }
}

const fn build_big_digits() -> [BigGlyph; 10] {
    let mut digits = [[[0u8; 2]; BIG_GLYPH_COLS]; 10];
    let mut d = 0;
    while d < 10 {
        digits[d] = stroke_glyph(digit_strokes(d as u8));
        d += 1;
    }
    digits
}

static BIG_DIGITS: [BigGlyph; 10] = build_big_digits();

static BIG_BLANK: BigGlyph = [[0x00; 2]; BIG_GLYPH_COLS];
static BIG_MINUS: BigGlyph = stroke_glyph(SEG_G);
static BIG_FALLBACK: BigGlyph = [[0xFF; 2]; BIG_GLYPH_COLS];

// Decimal point: a 2x2 dot in the bottom row band, centered.
static BIG_DOT: BigGlyph = [
    [0x00, 0x00],
    [0x00, 0x00],
    [0x00, 0x00],
    [0x00, 0xC0],
    [0x00, 0xC0],
    [0x00, 0x00],
    [0x00, 0x00],
    [0x00, 0x00],
];

// Colon: two 2x2 dots, one per bank, centered.
static BIG_COLON: BigGlyph = [
    [0x00, 0x00],
    [0x00, 0x00],
    [0x00, 0x00],
    [0x30, 0x0C],
    [0x30, 0x0C],
    [0x00, 0x00],
    [0x00, 0x00],
    [0x00, 0x00],
];

/// Look up the big glyph for an ASCII byte. Only the speed-readout set is
/// covered; anything else renders as a filled block.
pub fn big_glyph(c: u8) -> &'static BigGlyph {
    match c {
        b'0'..=b'9' => &BIG_DIGITS[(c - b'0') as usize],
        b'.' => &BIG_DOT,
        b'-' => &BIG_MINUS,
        b':' => &BIG_COLON,
        b' ' => &BIG_BLANK,
        _ => &BIG_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_printable_ascii() {
        assert_eq!(glyph(b'A'), &[0x7E, 0x11, 0x11, 0x11, 0x7E]);
        assert_eq!(glyph(b' '), &[0x00; 5]);
        assert_eq!(glyph(b'0'), &[0x3E, 0x51, 0x49, 0x45, 0x3E]);
    }

    #[test]
    fn out_of_range_renders_block() {
        assert_eq!(glyph(0x00), &FALLBACK);
        assert_eq!(glyph(0x1F), &FALLBACK);
        assert_eq!(glyph(0x80), &FALLBACK);
    }

    #[test]
    fn big_eight_has_every_stroke() {
        let eight = big_glyph(b'8');
        // Edge columns are solid, middle columns carry all three bars.
        assert_eq!(eight[0], [0xFF, 0xFF]);
        assert_eq!(eight[7], [0xFF, 0xFF]);
        assert_eq!(eight[3], [0x83, 0xC1]);
    }

    #[test]
    fn big_one_is_right_edge_only() {
        let one = big_glyph(b'1');
        assert_eq!(one[0], [0x00, 0x00]);
        assert_eq!(one[3], [0x00, 0x00]);
        assert_eq!(one[7], [0xFF, 0xFF]);
    }

    #[test]
    fn big_zero_has_no_middle_bar() {
        let zero = big_glyph(b'0');
        assert_eq!(zero[3], [0x03, 0xC0]);
    }

    #[test]
    fn big_punctuation() {
        assert_eq!(big_glyph(b'.')[3], [0x00, 0xC0]);
        assert_eq!(big_glyph(b' '), &BIG_BLANK);
        assert_eq!(big_glyph(b'x'), &BIG_FALLBACK);
    }
}
