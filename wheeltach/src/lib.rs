// SPDX-License-Identifier: MIT

//! # Wheel Tachometer Firmware
//!
//! Firmware for an IR wheel tachometer on an STM32F767: pulses from a
//! reflectance sensor are counted over a fixed window and reported as RPM
//! and road speed on a Nokia 5110 LCD, a three-digit seven-segment readout,
//! and the USART debug console.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level wrappers around GPIO, SPI, USART, ADC, timers |
//! | [`drivers`] | Device-level drivers (PCD8544 LCD, seven-segment digits) |
//! | [`control`] | Measurement logic (window math, pulse detection) |
//!
//! ## Binaries
//!
//! | Crate | Purpose |
//! | ----- | -------- |
//! | `wheeltach` | the interrupt-driven tachometer application |
//! | `lcd_demo` | walks the LCD driver through every operation |
//! | `adc_tach` | polled ADC-threshold variant of the tachometer |
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release
//! ```

#![no_std]

pub mod control;
pub mod drivers;
pub mod hw;
