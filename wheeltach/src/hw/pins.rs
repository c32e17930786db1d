// SPDX-License-Identifier: MIT

//! Pin definitions for the wheel tachometer on a Nucleo-F767ZI.
//!
//! Construct this once at startup:
//!
//! ```ignore
//! let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
//! ```
//!
//! The seven-segment digit buses (GPIOE/GPIOF/GPIOG bits 0..7) are whole
//! port slices and are configured by `drivers::seven_segment` directly.
//!
//! The `alt-pins` feature moves the LCD control lines to port B for boards
//! whose D13..D15 header pins are damaged; everything else stays put.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, Alternate, Analog, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins.
pub struct BoardPins {
    pub leds: LedPins,
    pub usart3: Usart3Pins,
    pub spi1: Spi1Pins,
    pub lcd: LcdPins,
    pub ir: IrPins,
}

/// Nucleo-144 user LEDs, active high.
pub struct LedPins {
    pub green: gpiob::PB0<Output<PushPull>>,
    pub blue: gpiob::PB7<Output<PushPull>>,
    pub red: gpiob::PB14<Output<PushPull>>,
}

/// USART3 console via the on-board ST-LINK.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// SPI1 SCK/MISO/MOSI for the LCD bus.
pub struct Spi1Pins {
    pub sck: gpioa::PA5<Alternate<5>>,
    pub miso: gpioa::PA6<Alternate<5>>,
    pub mosi: gpioa::PA7<Alternate<5>>,
}

/// LCD control lines: chip select, data/command, reset (active low).
#[cfg(not(feature = "alt-pins"))]
pub struct LcdPins {
    pub cs: gpiod::PD14<Output<PushPull>>,
    pub dc: gpiod::PD15<Output<PushPull>>,
    pub rst: gpiod::PD13<Output<PushPull>>,
}

/// LCD control lines on the alternate wiring.
#[cfg(feature = "alt-pins")]
pub struct LcdPins {
    pub cs: gpiob::PB12<Output<PushPull>>,
    pub dc: gpiob::PB11<Output<PushPull>>,
    pub rst: gpiob::PB10<Output<PushPull>>,
}

/// IR reflectance sensor: digital pulse output and raw analog level.
pub struct IrPins {
    /// Comparator output of the receiver, low while the marker passes.
    /// EXTI line 8.
    pub pulse: gpiob::PB8<Input<Floating>>,
    /// Raw photodiode level on ADC1_IN3.
    pub level: gpioa::PA3<Analog>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();

        Self {
            leds: LedPins {
                green: gpiob.pb0.into_push_pull_output(),
                blue: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            spi1: Spi1Pins {
                sck: gpioa.pa5.into_alternate::<5>(),
                miso: gpioa.pa6.into_alternate::<5>(),
                mosi: gpioa.pa7.into_alternate::<5>(),
            },

            #[cfg(not(feature = "alt-pins"))]
            lcd: LcdPins {
                cs: gpiod.pd14.into_push_pull_output(),
                dc: gpiod.pd15.into_push_pull_output(),
                rst: gpiod.pd13.into_push_pull_output(),
            },

            #[cfg(feature = "alt-pins")]
            lcd: LcdPins {
                cs: gpiob.pb12.into_push_pull_output(),
                dc: gpiob.pb11.into_push_pull_output(),
                rst: gpiob.pb10.into_push_pull_output(),
            },

            ir: IrPins {
                pulse: gpiob.pb8.into_floating_input(),
                level: gpioa.pa3.into_analog(),
            },
        }
    }
}
