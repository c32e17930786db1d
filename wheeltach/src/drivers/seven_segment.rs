//! Three-digit seven-segment speed readout.
//!
//! Each digit is a common-anode module wired to bits 0..7 of one GPIO port
//! (segments a..g on bits 0..6, decimal point on bit 7, all active low), so
//! a digit update is a single byte store to the port's output register:
//! GPIOE carries the tens digit, GPIOF the ones, GPIOG the tenths.
//!
//! The readout shows road speed as `t o.d`: the decimal point on the ones
//! digit is always lit and the tens digit blanks below 10.

use micromath::F32Ext;
use stm32f7xx_hal::pac;

/// Segment patterns for 0..=9, active low, decimal point (bit 7) off.
pub const GLYPHS: [u8; 10] = [
    0b1100_0000, // 0
    0b1111_1001, // 1
    0b1010_0100, // 2
    0b1011_0000, // 3
    0b1001_1001, // 4
    0b1001_0010, // 5
    0b1000_0010, // 6
    0b1111_1000, // 7
    0b1000_0000, // 8
    0b1001_1000, // 9
];

/// All segments off.
pub const BLANK: u8 = 0xFF;

/// Decimal point bit; clear it to light the point.
const DP_BIT: u8 = 0x80;

/// Look up the active-low pattern for one digit; out-of-range blanks.
pub fn glyph(digit: u8) -> u8 {
    match digit {
        0..=9 => GLYPHS[digit as usize],
        _ => BLANK,
    }
}

/// Split a speed into (tens, ones, tenths) display digits, rounding to the
/// nearest tenth and clamping to the 0.0..=99.9 range of the readout. The
/// tens digit comes back as `None` when it should be blanked.
pub fn speed_digits(speed: f32) -> (Option<u8>, u8, u8) {
    let clamped = if speed < 0.0 {
        0.0
    } else if speed > 99.9 {
        99.9
    } else {
        speed
    };
    let tenths_total = (clamped * 10.0).round() as u32;

    let tens = (tenths_total / 100) as u8;
    let ones = ((tenths_total / 10) % 10) as u8;
    let tenths = (tenths_total % 10) as u8;

    (if tens == 0 { None } else { Some(tens) }, ones, tenths)
}

/// The three digit modules on their dedicated ports.
pub struct SevenSegment {
    tens: pac::GPIOE,
    ones: pac::GPIOF,
    tenths: pac::GPIOG,
}

impl SevenSegment {
    /// Take the three digit ports, configure bits 0..7 as push-pull outputs
    /// and blank the display.
    pub fn new(tens: pac::GPIOE, ones: pac::GPIOF, tenths: pac::GPIOG) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.ahb1enr.modify(|_, w| {
            w.gpioeen().set_bit();
            w.gpiofen().set_bit();
            w.gpiogen().set_bit();
            w
        });

        // Bits 0..7 as general-purpose outputs (MODER = 01 per pin), all
        // segments off before the pins start driving.
        tens.odr.modify(|r, w| unsafe { w.bits(r.bits() | BLANK as u32) });
        tens.moder
            .modify(|r, w| unsafe { w.bits((r.bits() & !0x0000_FFFF) | 0x0000_5555) });

        ones.odr.modify(|r, w| unsafe { w.bits(r.bits() | BLANK as u32) });
        ones.moder
            .modify(|r, w| unsafe { w.bits((r.bits() & !0x0000_FFFF) | 0x0000_5555) });

        tenths
            .odr
            .modify(|r, w| unsafe { w.bits(r.bits() | BLANK as u32) });
        tenths
            .moder
            .modify(|r, w| unsafe { w.bits((r.bits() & !0x0000_FFFF) | 0x0000_5555) });

        Self { tens, ones, tenths }
    }

    /// Tear down the driver and return the ports.
    pub fn free(self) -> (pac::GPIOE, pac::GPIOF, pac::GPIOG) {
        (self.tens, self.ones, self.tenths)
    }

    /// Drive the three digits; `None` blanks the tens position. The decimal
    /// point lights on the ones digit.
    pub fn show_digits(&mut self, tens: Option<u8>, ones: u8, tenths: u8) {
        let tens_pattern = match tens {
            Some(d) => glyph(d),
            None => BLANK,
        };
        self.put_tens(tens_pattern);
        self.put_ones(glyph(ones) & !DP_BIT);
        self.put_tenths(glyph(tenths));
    }

    /// Show a speed reading.
    pub fn show_speed(&mut self, speed: f32) {
        let (tens, ones, tenths) = speed_digits(speed);
        self.show_digits(tens, ones, tenths);
    }

    /// Turn every segment off.
    pub fn blank(&mut self) {
        self.put_tens(BLANK);
        self.put_ones(BLANK);
        self.put_tenths(BLANK);
    }

    fn put_tens(&mut self, pattern: u8) {
        self.tens
            .odr
            .modify(|r, w| unsafe { w.bits((r.bits() & !0xFF) | pattern as u32) });
    }

    fn put_ones(&mut self, pattern: u8) {
        self.ones
            .odr
            .modify(|r, w| unsafe { w.bits((r.bits() & !0xFF) | pattern as u32) });
    }

    fn put_tenths(&mut self, pattern: u8) {
        self.tenths
            .odr
            .modify(|r, w| unsafe { w.bits((r.bits() & !0xFF) | pattern as u32) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_patterns() {
        assert_eq!(glyph(0), 0b1100_0000);
        assert_eq!(glyph(8), 0b1000_0000);
        assert_eq!(glyph(9), 0b1001_1000);
        assert_eq!(glyph(12), BLANK);
    }

    #[test]
    fn splits_speed_into_digits() {
        assert_eq!(speed_digits(12.34), (Some(1), 2, 3));
        assert_eq!(speed_digits(99.9), (Some(9), 9, 9));
        assert_eq!(speed_digits(5.25), (None, 5, 3));
    }

    #[test]
    fn blanks_leading_zero() {
        assert_eq!(speed_digits(0.0), (None, 0, 0));
        assert_eq!(speed_digits(9.9), (None, 9, 9));
        assert_eq!(speed_digits(10.0), (Some(1), 0, 0));
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(speed_digits(-3.0), (None, 0, 0));
        assert_eq!(speed_digits(250.0), (Some(9), 9, 9));
    }
}
