//! Measurement-window timer on TIM2.
//!
//! The tachometer counts IR pulses over a fixed window; TIM2 marks the end
//! of each window with its update event. The counter runs at a 10 kHz count
//! rate regardless of the bus clock, so the auto-reload value is just the
//! window length in 100 us ticks.
//!
//! Interrupt-driven use: `listen()` plus `NVIC::unmask(Interrupt::TIM2)`,
//! then `WindowTimer::clear_update_flag()` inside the `TIM2` handler.
//! Polled use: `poll_window()`.

use stm32f7xx_hal::{pac, rcc::Clocks};

/// Counter tick rate after prescaling.
pub const TICK_HZ: u32 = 10_000;

/// Prescaler value taking the APB1 timer clock down to [`TICK_HZ`].
fn psc_for(timclk: u32) -> u16 {
    (timclk / TICK_HZ).saturating_sub(1).min(u16::MAX as u32) as u16
}

/// Auto-reload value for a window of `window_ms` milliseconds.
fn window_ticks(window_ms: u32) -> u32 {
    window_ms.saturating_mul(TICK_HZ / 1000).max(1)
}

/// Periodic window timer over TIM2.
pub struct WindowTimer {
    tim: pac::TIM2,
}

impl WindowTimer {
    /// Configure TIM2 to raise an update event every `window_ms` milliseconds
    /// and start it. The update interrupt stays disabled until `listen()`.
    pub fn tim2(tim2: pac::TIM2, clocks: &Clocks, window_ms: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // APB1 timers run at twice PCLK1 whenever the APB1 prescaler is not 1
        let pclk1 = clocks.pclk1().raw();
        let timclk = if clocks.hclk().raw() > pclk1 {
            pclk1 * 2
        } else {
            pclk1
        };
        tim.psc.write(|w| w.psc().bits(psc_for(timclk)));

        // One update event per window
        tim.arr.write(|w| w.bits(window_ticks(window_ms) - 1));

        // Latch the prescaler, then drop the update flag the latch raised
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        // Reset and enable the counter
        tim.cnt.write(|w| w.bits(0));
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Enable the update interrupt. The caller still has to unmask the TIM2
    /// line in the NVIC.
    pub fn listen(&mut self) {
        self.tim.dier.modify(|_, w| w.uie().set_bit());
    }

    /// Check for and consume an expired window (polled mode).
    pub fn poll_window(&mut self) -> bool {
        if self.tim.sr.read().uif().bit_is_set() {
            self.tim.sr.modify(|_, w| w.uif().clear_bit());
            true
        } else {
            false
        }
    }

    /// Drop the update flag from inside the `TIM2` interrupt handler.
    #[inline]
    pub fn clear_update_flag() {
        let tim = unsafe { &*pac::TIM2::ptr() };
        tim.sr.modify(|_, w| w.uif().clear_bit());
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> pac::TIM2 {
        self.tim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prescaler_hits_tick_rate() {
        // 16 MHz HSI default and a 48 MHz part both divide evenly to 10 kHz.
        assert_eq!(psc_for(16_000_000), 1599);
        assert_eq!(psc_for(48_000_000), 4799);
    }

    #[test]
    fn prescaler_saturates() {
        assert_eq!(psc_for(u32::MAX), u16::MAX);
    }

    #[test]
    fn window_tick_counts() {
        assert_eq!(window_ticks(1000), 10_000);
        assert_eq!(window_ticks(250), 2_500);
        // Degenerate windows still produce a running timer.
        assert_eq!(window_ticks(0), 1);
    }
}
