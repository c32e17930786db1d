#![no_main]
#![no_std]

//! ADC-threshold tachometer.
//!
//! Alternative to the interrupt-driven `wheeltach` binary for sensors
//! without a clean comparator output: the raw IR level on ADC1 channel 3 is
//! sampled in a tight loop and pushed through a hysteresis detector, and
//! the window timer is polled instead of firing an interrupt. Results go to
//! the USART console only.

use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use wheeltach::control::{EdgeDetector, Tachometer};
use wheeltach::hw::{Adc, BoardPins, Led, Usart, WindowTimer};

/// PA3 = ADC1_IN3, the receiver's raw photodiode level.
const IR_CHANNEL: u8 = 3;

const PULSES_PER_REV: u32 = 1;
const WHEEL_DIAMETER_FT: f32 = 0.479003;
const WINDOW_MS: u32 = 1000;

// Raw 12-bit thresholds: the receiver idles near the rail and dips toward
// ground while the marker passes.
const DARK_THRESHOLD: u16 = 300;
const REARM_THRESHOLD: u16 = 600;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // GPIO (PA3 comes back configured as analog)
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
    let mut led = Led::new(pins.leds.blue);

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

    let adc = Adc::adc1(dp.ADC1);
    let mut detector = EdgeDetector::new(DARK_THRESHOLD, REARM_THRESHOLD);
    let mut window = WindowTimer::tim2(dp.TIM2, &clocks, WINDOW_MS);
    let tach = Tachometer::new(PULSES_PER_REV, WINDOW_MS, WHEEL_DIAMETER_FT);

    usart.println("adc_tach: starting");

    let mut pulses: u32 = 0;
    loop {
        let raw = adc.read(IR_CHANNEL);
        if detector.update(raw) {
            pulses += 1;
        }

        if window.poll_window() {
            let reading = tach.reading(pulses);
            pulses = 0;
            led.toggle();

            usart.write_str("raw ");
            usart.print_hex_u16(raw);
            usart.write_str(" (");
            usart.print_u32(adc.read_mv(IR_CHANNEL) as u32);
            usart.write_str(" mV)  pulses ");
            usart.print_u32(reading.pulses);
            usart.write_str("  rpm ");
            usart.print_fixed1((reading.rpm * 10.0) as u32);
            usart.write_str("  mph ");
            usart.print_fixed1((reading.mph * 10.0) as u32);
            usart.write_str("\r\n");
        }
    }
}
