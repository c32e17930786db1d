#![no_main]
#![no_std]

//! Nokia 5110 driver demonstration.
//!
//! Cycles through every LCD operation with a pause between steps: small and
//! big text, explicit addressing, a full-frame bitmap, every numeric format,
//! the contrast range and the display modes. Useful as a bring-up check for
//! freshly wired displays.

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use embedded_hal::digital::v2::OutputPin;
use panic_halt as _;

use hal::{pac, prelude::*, spi::Spi};
use stm32f7xx_hal as hal;

use wheeltach::drivers::pcd8544::{self, DisplayMode, Pcd8544};
use wheeltach::hw::{BoardPins, ChipSelect, Led, SpiBus};

const STEP_MS: u32 = 2000;

/// Checkerboard with a solid frame, built at compile time. Bit patterns are
/// bank/column bytes in the controller's horizontal addressing order.
const fn test_pattern() -> [u8; pcd8544::FRAME_BYTES] {
    let mut bmp = [0u8; pcd8544::FRAME_BYTES];
    let mut i = 0;
    while i < bmp.len() {
        let bank = i / pcd8544::WIDTH as usize;
        let col = i % pcd8544::WIDTH as usize;

        let mut b: u8 = if (col / 4 + bank) % 2 == 0 { 0x0F } else { 0xF0 };
        if col == 0 || col == pcd8544::WIDTH as usize - 1 {
            b = 0xFF;
        }
        if bank == 0 {
            b |= 0x01;
        }
        if bank == pcd8544::BANKS as usize - 1 {
            b |= 0x80;
        }

        bmp[i] = b;
        i += 1;
    }
    bmp
}

static TEST_PATTERN: [u8; pcd8544::FRAME_BYTES] = test_pattern();

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb2 = rcc.apb2;

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
    let mut led = Led::new(pins.leds.green);

    // SPI1 + LCD
    let spi1 = Spi::new(dp.SPI1, (pins.spi1.sck, pins.spi1.miso, pins.spi1.mosi)).enable::<u8>(
        pcd8544::SPI_MODE,
        4.MHz(),
        &clocks,
        &mut apb2,
    );
    let mut spi = SpiBus::new(spi1);
    let cs = ChipSelect::active_low(pins.lcd.cs);
    let mut lcd = Pcd8544::new(cs, pins.lcd.dc, pins.lcd.rst);

    // SysTick delay from cortex-m, needs core clock in Hz (u32)
    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    loop {
        // A failed step leaves the bus idle; just restart the tour.
        led.toggle();
        let _ = run_demos(&mut lcd, &mut spi, &mut delay);
    }
}

fn run_demos<const P: char, const N: u8, DC, RST, I, PINS>(
    lcd: &mut Pcd8544<P, N, DC, RST>,
    spi: &mut SpiBus<I, PINS>,
    delay: &mut Delay,
) -> Result<(), hal::spi::Error>
where
    DC: OutputPin,
    RST: OutputPin,
    I: hal::spi::Instance,
    PINS: hal::spi::Pins<I>,
{
    lcd.init(spi)?;

    // Small text: a run of characters, then explicit addressing.
    for c in b'0'..=b'C' {
        lcd.print_char(spi, c)?;
        delay.delay_ms(100_u32);
    }
    lcd.goto_xy(spi, 3, 3)?;
    lcd.print_char(spi, b'r')?;
    lcd.goto_xy(spi, 5, 5)?;
    lcd.print_char(spi, b's')?;
    lcd.set_row(spi, 4)?;
    lcd.print_char(spi, b't')?;
    lcd.set_col(spi, 3)?;
    lcd.print_char(spi, b'u')?;
    lcd.goto_xy(spi, 5, 1)?;
    lcd.print_str(spi, "testing")?;
    delay.delay_ms(STEP_MS);

    // Big glyphs: corners, then a wrapping string.
    lcd.clear(spi)?;
    lcd.print_bigchar(spi, 0, 0, b'8')?;
    lcd.print_bigchar(spi, 7, 2, b'0')?;
    lcd.print_bigstr(spi, 5, 0, "12:34.5")?;
    delay.delay_ms(STEP_MS);

    // Full-frame bitmap.
    lcd.print_bitmap(spi, &TEST_PATTERN)?;
    delay.delay_ms(STEP_MS);

    // Binary.
    lcd.clear(spi)?;
    lcd.print_bin8(spi, 0)?;
    lcd.goto_xy(spi, 0, 1)?;
    lcd.print_bin16(spi, 0)?;
    lcd.goto_xy(spi, 0, 3)?;
    lcd.print_bin8(spi, 0xA5)?;
    lcd.goto_xy(spi, 0, 4)?;
    lcd.print_bin16(spi, 0xA5A5)?;
    delay.delay_ms(STEP_MS);

    // Hex.
    lcd.clear(spi)?;
    lcd.print_hex8(spi, 0xA5)?;
    lcd.goto_xy(spi, 0, 1)?;
    lcd.print_hex16(spi, 0xBEEF)?;
    lcd.goto_xy(spi, 0, 2)?;
    lcd.print_hex32(spi, 0xDEAD_BEEF)?;
    delay.delay_ms(STEP_MS);

    // Unsigned decimal fields.
    lcd.clear(spi)?;
    lcd.print_udec3(spi, 0)?;
    lcd.goto_xy(spi, 0, 1)?;
    lcd.print_udec3(spi, 255)?;
    lcd.goto_xy(spi, 0, 2)?;
    lcd.print_udec5(spi, 65_535)?;
    lcd.goto_xy(spi, 0, 3)?;
    lcd.print_udec10(spi, u32::MAX)?;
    delay.delay_ms(STEP_MS);

    // Signed decimal fields.
    lcd.clear(spi)?;
    lcd.print_dec3(spi, 42)?;
    lcd.goto_xy(spi, 0, 1)?;
    lcd.print_dec3(spi, i8::MIN)?;
    lcd.goto_xy(spi, 0, 2)?;
    lcd.print_dec5(spi, i16::MIN)?;
    lcd.goto_xy(spi, 0, 3)?;
    lcd.print_dec10(spi, i32::MIN)?;
    delay.delay_ms(STEP_MS);

    // Scientific notation.
    lcd.clear(spi)?;
    lcd.print_float(spi, 3.14159)?;
    lcd.goto_xy(spi, 0, 1)?;
    lcd.print_float(spi, -0.00072)?;
    lcd.goto_xy(spi, 0, 2)?;
    lcd.print_float(spi, 6.022e23)?;
    lcd.goto_xy(spi, 0, 3)?;
    lcd.print_float(spi, 0.0)?;
    delay.delay_ms(STEP_MS);

    // Contrast sweep, then back to the midpoint.
    lcd.clear(spi)?;
    lcd.print_str(spi, "contrast")?;
    for level in 0..=10 {
        lcd.set_contrast(spi, level)?;
        delay.delay_ms(300_u32);
    }
    lcd.set_contrast(spi, 6)?;

    // Display modes.
    lcd.set_display_mode(spi, DisplayMode::Inverse)?;
    delay.delay_ms(STEP_MS);
    lcd.set_display_mode(spi, DisplayMode::Normal)?;
    delay.delay_ms(STEP_MS);

    Ok(())
}
