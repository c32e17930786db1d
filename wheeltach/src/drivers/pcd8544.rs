//! PCD8544 driver for the Nokia 5110 48x84 pixel LCD.
//!
//! The controller is write-only over SPI; a D/C GPIO selects between
//! command bytes (configuration, DDRAM addressing) and data bytes (pixel
//! columns). DDRAM is laid out as 6 vertical banks of 8 pixels by 84
//! columns: each data byte fills one bank/column pair with the LSB as the
//! top pixel, and the controller advances the column (wrapping to the next
//! bank) after every data write.
//!
//! Text uses the 5x8 font from [`font`], padded with a blank column on each
//! side so the display holds 12 characters by 6 rows. Big glyphs span two
//! banks and 10 columns, giving an 8x3 grid; since the controller cannot be
//! read back, both banks are addressed explicitly.
//!
//! The SPI bus is not owned here and must be passed in as `&mut SpiBus` so
//! that multiple devices can share one bus safely.

use embedded_hal::digital::v2::OutputPin;

use crate::drivers::font;
use crate::hw::{ChipSelect, SpiBus};
use stm32f7xx_hal::spi;

/// Display width in pixels (columns).
pub const WIDTH: u8 = 84;
/// Display height in 8-pixel banks.
pub const BANKS: u8 = 6;
/// DDRAM size: one byte per bank/column pair.
pub const FRAME_BYTES: usize = WIDTH as usize * BANKS as usize;

/// Width of one character cell in pixels (5-column glyph plus padding).
pub const CHAR_WIDTH: u8 = 7;
/// Character grid: 12 columns by 6 rows.
pub const CHAR_COLS: u8 = WIDTH / CHAR_WIDTH;
pub const CHAR_ROWS: u8 = BANKS;

/// Width of one big-glyph cell in pixels (8-column glyph plus padding).
pub const BIG_CELL_WIDTH: u8 = 10;
/// Big-glyph grid: 8 columns by 3 rows of two-bank cells.
pub const BIG_COLS: u8 = 8;
pub const BIG_ROWS: u8 = BANKS / 2;

/// Recommended SPI mode: CPOL=0, CPHA=0, 4 MHz maximum.
pub const SPI_MODE: spi::Mode = spi::Mode {
    polarity: spi::Polarity::IdleLow,
    phase: spi::Phase::CaptureOnFirstTransition,
};

// Command bytes
pub mod cmd {
    /// Function set: active, horizontal addressing, basic instruction set.
    pub const FUNCTION_BASIC: u8 = 0x20;
    /// Function set: active, horizontal addressing, extended instruction set.
    pub const FUNCTION_EXTENDED: u8 = 0x21;
    /// Temperature coefficient 0 (extended set).
    pub const TEMP_COEFF: u8 = 0x04;
    /// Bias system 1:48, the value the datasheet recommends (extended set).
    pub const BIAS: u8 = 0x14;

    /// Set the DDRAM X address (pixel column, 0..84).
    pub const fn x_addr(px: u8) -> u8 {
        0x80 | (px & 0x7F)
    }

    /// Set the DDRAM Y address (bank, 0..6).
    pub const fn y_addr(bank: u8) -> u8 {
        0x40 | (bank & 0x07)
    }

    /// Set the LCD operating voltage (extended set).
    pub const fn vop(word: u8) -> u8 {
        0x80 | word
    }
}

/// Display control modes (basic instruction set).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum DisplayMode {
    Blank = 0x08,
    Normal = 0x0C,
    AllSegmentsOn = 0x09,
    Inverse = 0x0D,
}

/// Default Vop word; larger values give a darker display.
const DEFAULT_VOP: u8 = 0x31;

/// Map a user contrast level 0..=10 onto the usable Vop word range 30..=60.
/// Below 30 the glass is effectively off; values near 60 wash out.
fn vop_for_contrast(level: u8) -> u8 {
    let level = level.min(10) as u16;
    cmd::vop((30 + level * 3) as u8)
}

/// PCD8544 display bound to a chip select and D/C + reset control lines.
pub struct Pcd8544<const P: char, const N: u8, DC, RST> {
    cs: ChipSelect<P, N>,
    dc: DC,
    rst: RST,
}

impl<const P: char, const N: u8, DC, RST> Pcd8544<P, N, DC, RST>
where
    DC: OutputPin,
    RST: OutputPin,
{
    /// Construct a driver from its control lines. Call `init` before use.
    pub fn new(cs: ChipSelect<P, N>, dc: DC, mut rst: RST) -> Self {
        rst.set_high().ok();
        Self { cs, dc, rst }
    }

    /// Tear down the driver and return the control lines.
    pub fn free(self) -> (ChipSelect<P, N>, DC, RST) {
        (self.cs, self.dc, self.rst)
    }

    /// Reset and configure the controller, then clear the display.
    ///
    /// The sequence follows the datasheet: program temperature coefficient,
    /// bias and Vop through the extended instruction set, switch back to the
    /// basic set, select normal display mode.
    pub fn init<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        // Reset pulse, active low. The controller needs under 100 ns; a few
        // dozen core cycles is plenty.
        self.rst.set_low().ok();
        cortex_m::asm::delay(64);
        self.rst.set_high().ok();

        self.write_command(spi, cmd::FUNCTION_EXTENDED)?;
        self.write_command(spi, cmd::TEMP_COEFF)?;
        self.write_command(spi, cmd::BIAS)?;
        self.write_command(spi, cmd::vop(DEFAULT_VOP))?;
        self.write_command(spi, cmd::FUNCTION_BASIC)?;
        self.write_command(spi, DisplayMode::Normal as u8)?;

        self.clear(spi)
    }

    /// Change the display mode (normal, inverse, blank, all-on).
    pub fn set_display_mode<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        mode: DisplayMode,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.write_command(spi, mode as u8)
    }

    /// Map a contrast level 0..=10 onto the Vop range and program it.
    pub fn set_contrast<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        level: u8,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.write_command(spi, cmd::FUNCTION_EXTENDED)?;
        self.write_command(spi, vop_for_contrast(level))?;
        self.write_command(spi, cmd::FUNCTION_BASIC)?;
        self.write_command(spi, DisplayMode::Normal as u8)
    }

    // ----- addressing -----

    /// Move to a character cell. Columns 0..12, rows 0..6; out-of-range
    /// values wrap rather than touching reserved address bits.
    pub fn goto_xy<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        col: u8,
        row: u8,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.write_command(spi, cmd::x_addr((col % CHAR_COLS) * CHAR_WIDTH))?;
        self.write_command(spi, cmd::y_addr(row % CHAR_ROWS))
    }

    /// Move to character cell (0, 0).
    pub fn home<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.goto_xy(spi, 0, 0)
    }

    /// Change the character row, keeping the current column.
    pub fn set_row<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>, row: u8) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.write_command(spi, cmd::y_addr(row % CHAR_ROWS))
    }

    /// Change the character column, keeping the current row.
    pub fn set_col<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>, col: u8) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.write_command(spi, cmd::x_addr((col % CHAR_COLS) * CHAR_WIDTH))
    }

    // ----- text -----

    /// Print one character at the current cell. The controller advances to
    /// the next cell on its own, wrapping at the end of the row.
    pub fn print_char<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>, c: u8) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.write_data(spi, 0x00)?;
        for &col in font::glyph(c) {
            self.write_data(spi, col)?;
        }
        self.write_data(spi, 0x00)
    }

    /// Print a string at the current cell.
    pub fn print_str<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        s: &str,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        for &b in s.as_bytes() {
            self.print_char(spi, b)?;
        }
        Ok(())
    }

    /// Blank the whole DDRAM and return to (0, 0).
    pub fn clear<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.goto_xy(spi, 0, 0)?;
        for _ in 0..FRAME_BYTES {
            self.write_data(spi, 0x00)?;
        }
        self.goto_xy(spi, 0, 0)
    }

    /// Write a full-frame bitmap: 504 bytes in horizontal addressing order
    /// (bank by bank, LSB at the top of each byte).
    pub fn print_bitmap<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        bmp: &[u8; FRAME_BYTES],
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.goto_xy(spi, 0, 0)?;
        for &b in bmp.iter() {
            self.write_data(spi, b)?;
        }
        Ok(())
    }

    // ----- big text -----

    /// Print one big glyph at big-grid cell (x 0..8, y 0..3). Both banks of
    /// the cell are addressed explicitly, so this does not wrap on its own.
    pub fn print_bigchar<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        x: u8,
        y: u8,
        c: u8,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        let glyph = font::big_glyph(c);
        for bank in 0..2u8 {
            self.write_command(spi, cmd::x_addr(x * BIG_CELL_WIDTH))?;
            self.write_command(spi, cmd::y_addr(y * 2 + bank))?;
            self.write_data(spi, 0x00)?;
            for col in glyph.iter() {
                self.write_data(spi, col[bank as usize])?;
            }
            self.write_data(spi, 0x00)?;
        }
        Ok(())
    }

    /// Print a string of big glyphs starting at big-grid cell (x, y),
    /// wrapping in software at the grid edges.
    pub fn print_bigstr<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        x: u8,
        y: u8,
        s: &str,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        let mut x = x;
        let mut y = y;
        for &b in s.as_bytes() {
            if x >= BIG_COLS {
                x = 0;
                y += 1;
            }
            if y >= BIG_ROWS {
                y = 0;
            }
            self.print_bigchar(spi, x, y, b)?;
            x += 1;
        }
        Ok(())
    }

    // ----- numbers -----

    /// Print an 8-bit value as binary, MSB first.
    pub fn print_bin8<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>, val: u8) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        for shift in (0..8).rev() {
            self.print_char(spi, b'0' + ((val >> shift) & 1))?;
        }
        Ok(())
    }

    /// Print a 16-bit value as binary, MSB first.
    pub fn print_bin16<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: u16,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        for shift in (0..16).rev() {
            self.print_char(spi, b'0' + ((val >> shift) & 1) as u8)?;
        }
        Ok(())
    }

    /// Print an 8-bit value as 0xHH.
    pub fn print_hex8<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>, val: u8) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.print_hex(spi, val as u32, 2)
    }

    /// Print a 16-bit value as 0xHHHH.
    pub fn print_hex16<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: u16,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.print_hex(spi, val as u32, 4)
    }

    /// Print a 32-bit value as 0xHHHHHHHH.
    pub fn print_hex32<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: u32,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.print_hex(spi, val, 8)
    }

    fn print_hex<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: u32,
        nibbles: usize,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.print_str(spi, "0x")?;
        let mut buf = [0u8; 8];
        hex_field(val, nibbles, &mut buf);
        for &b in &buf[..nibbles] {
            self.print_char(spi, b)?;
        }
        Ok(())
    }

    /// Print an 8-bit unsigned value right-aligned in a 3-character field.
    pub fn print_udec3<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>, val: u8) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.print_udec(spi, val as u32, 3)
    }

    /// Print a 16-bit unsigned value right-aligned in a 5-character field.
    pub fn print_udec5<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: u16,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.print_udec(spi, val as u32, 5)
    }

    /// Print a 32-bit unsigned value right-aligned in a 10-character field.
    pub fn print_udec10<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: u32,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.print_udec(spi, val, 10)
    }

    fn print_udec<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: u32,
        width: usize,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        let mut buf = [0u8; 10];
        dec_field(val, width, &mut buf);
        for &b in &buf[..width] {
            self.print_char(spi, b)?;
        }
        Ok(())
    }

    /// Print an 8-bit signed value: minus sign, then a 3-character field.
    pub fn print_dec3<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>, val: i8) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        if val < 0 {
            self.print_char(spi, b'-')?;
        }
        self.print_udec(spi, val.unsigned_abs() as u32, 3)
    }

    /// Print a 16-bit signed value: minus sign, then a 5-character field.
    pub fn print_dec5<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: i16,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        if val < 0 {
            self.print_char(spi, b'-')?;
        }
        self.print_udec(spi, val.unsigned_abs() as u32, 5)
    }

    /// Print a 32-bit signed value: minus sign, then a 10-character field.
    pub fn print_dec10<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: i32,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        if val < 0 {
            self.print_char(spi, b'-')?;
        }
        self.print_udec(spi, val.unsigned_abs(), 10)
    }

    /// Print a float in `x.xxxxEyy` scientific notation.
    pub fn print_float<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        val: f32,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        let mut buf = [0u8; 12];
        let len = format_sci(val, &mut buf);
        for &b in &buf[..len] {
            self.print_char(spi, b)?;
        }
        Ok(())
    }

    // ----- message write primitives -----

    fn write_command<I, PINS>(
        &mut self,
        spi: &mut SpiBus<I, PINS>,
        byte: u8,
    ) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.dc.set_low().ok();
        self.cs.select();
        let res = spi.write_byte(byte);
        self.cs.deselect();
        res
    }

    fn write_data<I, PINS>(&mut self, spi: &mut SpiBus<I, PINS>, byte: u8) -> Result<(), spi::Error>
    where
        I: spi::Instance,
        PINS: spi::Pins<I>,
    {
        self.dc.set_high().ok();
        self.cs.select();
        let res = spi.write_byte(byte);
        self.cs.deselect();
        res
    }
}

// ----- pure formatting helpers -----

/// Fill `buf[..width]` with `val` right-aligned in ASCII decimal, padded
/// with spaces. The caller picks a width that fits the value's type.
fn dec_field(mut val: u32, width: usize, buf: &mut [u8]) {
    let mut i = width;
    loop {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
        if val == 0 {
            break;
        }
    }
    while i > 0 {
        i -= 1;
        buf[i] = b' ';
    }
}

/// Fill `buf[..nibbles]` with the low `nibbles` hex digits of `val`.
fn hex_field(val: u32, nibbles: usize, buf: &mut [u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for (i, slot) in buf[..nibbles].iter_mut().enumerate() {
        let shift = 4 * (nibbles - 1 - i);
        *slot = HEX[((val >> shift) & 0xF) as usize];
    }
}

/// Positive powers of ten as f32, without the math library.
fn pow10f(exp: i32) -> f32 {
    let mut p = 1.0f32;
    if exp >= 0 {
        for _ in 0..exp {
            p *= 10.0;
        }
    } else {
        for _ in 0..-exp {
            p /= 10.0;
        }
    }
    p
}

/// Format `val` as `x.xxxxEyy` into `buf`, returning the length used.
/// Zero formats as `0.0000E0`.
fn format_sci(val: f32, buf: &mut [u8; 12]) -> usize {
    let mut n = 0;
    let mut v = val;
    if v < 0.0 {
        buf[n] = b'-';
        n += 1;
        v = -v;
    }
    if v == 0.0 {
        for &b in b"0.0000E0" {
            buf[n] = b;
            n += 1;
        }
        return n;
    }

    // Smallest f32 magnitudes start near 1e-38; scan up to the decade.
    let mut exp: i32 = -38;
    while v >= pow10f(exp + 1) {
        exp += 1;
    }

    // Five significant digits, rounded; bump the exponent if rounding
    // carries past 9.9999.
    let mut digits = (v * pow10f(-exp) * 10_000.0 + 0.5) as u32;
    if digits >= 100_000 {
        digits /= 10;
        exp += 1;
    }

    buf[n] = b'0' + (digits / 10_000) as u8;
    n += 1;
    buf[n] = b'.';
    n += 1;
    let mut pow = 1_000u32;
    for _ in 0..4 {
        buf[n] = b'0' + ((digits / pow) % 10) as u8;
        n += 1;
        pow /= 10;
    }

    buf[n] = b'E';
    n += 1;
    if exp < 0 {
        buf[n] = b'-';
        n += 1;
    }
    let e = exp.unsigned_abs();
    if e >= 10 {
        buf[n] = b'0' + (e / 10) as u8;
        n += 1;
    }
    buf[n] = b'0' + (e % 10) as u8;
    n += 1;
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sci(val: f32) -> ([u8; 12], usize) {
        let mut buf = [0u8; 12];
        let len = format_sci(val, &mut buf);
        (buf, len)
    }

    #[test]
    fn ddram_address_commands() {
        assert_eq!(cmd::x_addr(0), 0x80);
        assert_eq!(cmd::x_addr(83), 0x80 | 83);
        assert_eq!(cmd::y_addr(0), 0x40);
        assert_eq!(cmd::y_addr(5), 0x45);
        // Reserved bits never get set.
        assert_eq!(cmd::y_addr(0xFF), 0x47);
        assert_eq!(cmd::x_addr(0x90), 0x90);
    }

    #[test]
    fn contrast_maps_to_vop_window() {
        assert_eq!(vop_for_contrast(0), 0x80 | 30);
        assert_eq!(vop_for_contrast(5), 0x80 | 45);
        assert_eq!(vop_for_contrast(10), 0x80 | 60);
        // Out-of-range levels clamp instead of spilling into command bits.
        assert_eq!(vop_for_contrast(200), 0x80 | 60);
    }

    #[test]
    fn decimal_fields_right_align() {
        let mut buf = [0u8; 10];
        dec_field(0, 3, &mut buf);
        assert_eq!(&buf[..3], b"  0");
        dec_field(7, 3, &mut buf);
        assert_eq!(&buf[..3], b"  7");
        dec_field(255, 3, &mut buf);
        assert_eq!(&buf[..3], b"255");
        dec_field(65_535, 5, &mut buf);
        assert_eq!(&buf[..5], b"65535");
        dec_field(4_294_967_295, 10, &mut buf);
        assert_eq!(&buf[..10], b"4294967295");
    }

    #[test]
    fn hex_fields() {
        let mut buf = [0u8; 8];
        hex_field(0xA5, 2, &mut buf);
        assert_eq!(&buf[..2], b"A5");
        hex_field(0xBEEF, 4, &mut buf);
        assert_eq!(&buf[..4], b"BEEF");
        hex_field(0x0012_3ABC, 8, &mut buf);
        assert_eq!(&buf[..8], b"00123ABC");
    }

    #[test]
    fn scientific_format() {
        let (buf, len) = sci(1.0);
        assert_eq!(&buf[..len], b"1.0000E0");

        let (buf, len) = sci(-12.34);
        assert_eq!(&buf[..len], b"-1.2340E1");

        let (buf, len) = sci(0.05);
        assert_eq!(&buf[..len], b"5.0000E-2");

        let (buf, len) = sci(123_456.0);
        assert_eq!(&buf[..len], b"1.2346E5");
    }

    #[test]
    fn scientific_format_zero() {
        let (buf, len) = sci(0.0);
        assert_eq!(&buf[..len], b"0.0000E0");
    }

    #[test]
    fn scientific_rounding_carries_into_exponent() {
        let (buf, len) = sci(9.99999);
        assert_eq!(&buf[..len], b"1.0000E1");
    }
}
