#![no_main]
#![no_std]

//! IR wheel tachometer.
//!
//! The EXTI handler counts sensor pulses into an atomic; TIM2 marks the end
//! of each one-second measurement window. The main loop sleeps between
//! interrupts and, on every window, converts the count into RPM and road
//! speed for the LCD, the seven-segment readout and the debug console.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use embedded_hal::digital::v2::OutputPin;
use panic_halt as _;

use hal::{
    pac,
    pac::interrupt,
    prelude::*,
    serial::{Config, Serial},
    spi::Spi,
};
use stm32f7xx_hal as hal;

use wheeltach::control::{Reading, Tachometer};
use wheeltach::drivers::{pcd8544, seven_segment, Pcd8544, SevenSegment};
use wheeltach::hw::{BoardPins, ChipSelect, IrInput, Led, SpiBus, Usart, WindowTimer};

// One reflective marker on a 146 mm (0.479003 ft) wheel.
const PULSES_PER_REV: u32 = 1;
const WHEEL_DIAMETER_FT: f32 = 0.479003;
const WINDOW_MS: u32 = 1000;

/// Pulses counted by the EXTI handler in the current window.
static PULSES: AtomicU32 = AtomicU32::new(0);
/// Set by the TIM2 handler when a window expires.
static WINDOW_EXPIRED: AtomicBool = AtomicBool::new(false);

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb2 = rcc.apb2;

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);

    // LEDs
    let mut led_heartbeat = Led::new(pins.leds.blue);
    let mut led_moving = Led::new(pins.leds.green);

    // USART3 (DBG)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);

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

    // Seven-segment readout on ports E/F/G
    let mut sevseg = SevenSegment::new(dp.GPIOE, dp.GPIOF, dp.GPIOG);

    // IR pulse input and measurement window
    let ir = IrInput::new(pins.ir.pulse);
    let mut window = WindowTimer::tim2(dp.TIM2, &clocks, WINDOW_MS);
    window.listen();

    let tach = Tachometer::new(PULSES_PER_REV, WINDOW_MS, WHEEL_DIAMETER_FT);

    usart.println("wheeltach: starting");
    // Alignment check: the beam should be unbroken at rest.
    usart.write_str("wheeltach: sensor ");
    usart.println(if ir.is_low() { "blocked" } else { "clear" });

    if lcd.init(&mut spi).is_err() {
        usart.println("wheeltach: LCD init failed");
    }
    let _ = draw_labels(&mut lcd, &mut spi);
    sevseg.show_speed(0.0);

    unsafe {
        NVIC::unmask(pac::Interrupt::EXTI9_5);
        NVIC::unmask(pac::Interrupt::TIM2);
    }

    loop {
        cortex_m::asm::wfi();

        if !WINDOW_EXPIRED.swap(false, Ordering::AcqRel) {
            continue;
        }

        let pulses = PULSES.swap(0, Ordering::AcqRel);
        let reading = tach.reading(pulses);

        led_heartbeat.toggle();
        led_moving.set(reading.pulses > 0);

        let _ = draw_reading(&mut lcd, &mut spi, &reading);
        sevseg.show_speed(reading.mph);

        usart.write_str("pulses ");
        usart.print_u32(reading.pulses);
        usart.write_str("  rpm ");
        usart.print_fixed1((reading.rpm * 10.0) as u32);
        usart.write_str("  mph ");
        usart.print_fixed1((reading.mph * 10.0) as u32);
        usart.write_str("\r\n");
    }
}

/// Static screen furniture: title row and the RPM caption.
fn draw_labels<const P: char, const N: u8, DC, RST, I, PINS>(
    lcd: &mut Pcd8544<P, N, DC, RST>,
    spi: &mut SpiBus<I, PINS>,
) -> Result<(), hal::spi::Error>
where
    DC: OutputPin,
    RST: OutputPin,
    I: hal::spi::Instance,
    PINS: hal::spi::Pins<I>,
{
    lcd.goto_xy(spi, 0, 0)?;
    lcd.print_str(spi, " WHEEL SPEED")?;
    lcd.goto_xy(spi, 0, 5)?;
    lcd.print_str(spi, "RPM")?;
    Ok(())
}

/// Redraw the variable fields: big-digit mph and the RPM value.
fn draw_reading<const P: char, const N: u8, DC, RST, I, PINS>(
    lcd: &mut Pcd8544<P, N, DC, RST>,
    spi: &mut SpiBus<I, PINS>,
    reading: &Reading,
) -> Result<(), hal::spi::Error>
where
    DC: OutputPin,
    RST: OutputPin,
    I: hal::spi::Instance,
    PINS: hal::spi::Pins<I>,
{
    let (tens, ones, tenths) = seven_segment::speed_digits(reading.mph);
    let glyphs = [
        tens.map_or(b' ', |d| b'0' + d),
        b'0' + ones,
        b'.',
        b'0' + tenths,
    ];
    for (i, &g) in glyphs.iter().enumerate() {
        lcd.print_bigchar(spi, 2 + i as u8, 1, g)?;
    }

    lcd.goto_xy(spi, 4, 5)?;
    lcd.print_udec5(spi, reading.rpm as u16)?;
    Ok(())
}

#[interrupt]
fn EXTI9_5() {
    if IrInput::pending() {
        IrInput::clear_pending();
        PULSES.fetch_add(1, Ordering::Relaxed);
    }
}

#[interrupt]
fn TIM2() {
    WindowTimer::clear_update_flag();
    WINDOW_EXPIRED.store(true, Ordering::Release);
}
