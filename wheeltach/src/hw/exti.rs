//! External interrupt input for the IR wheel sensor.
//!
//! The receiver's comparator output sits high and drops low while the
//! reflective marker (or a spoke) passes, so the pulse count comes from
//! falling edges on EXTI line 8 (PB8).
//!
//! The `EXTI9_5` handler should check `IrInput::pending()` and acknowledge
//! with `IrInput::clear_pending()` before counting the pulse.

use stm32f7xx_hal::{
    gpio::{gpiob, Floating, Input},
    pac,
};

/// IR sensor pulse input bound to PB8 / EXTI8.
pub struct IrInput {
    pin: gpiob::PB8<Input<Floating>>,
}

impl IrInput {
    /// Route PB8 to EXTI line 8 and arm a falling-edge interrupt.
    ///
    /// The caller still has to unmask `Interrupt::EXTI9_5` in the NVIC.
    pub fn new(pin: gpiob::PB8<Input<Floating>>) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

        // EXTI8 source: port B
        let syscfg = unsafe { &*pac::SYSCFG::ptr() };
        syscfg.exticr3.modify(|_, w| unsafe { w.exti8().bits(0b0001) });

        let exti = unsafe { &*pac::EXTI::ptr() };

        // Falling edge only
        exti.ftsr.modify(|_, w| w.tr8().set_bit());
        exti.rtsr.modify(|_, w| w.tr8().clear_bit());

        // Drop anything latched while wiring up, then unmask the line
        exti.pr.write(|w| w.pr8().set_bit());
        exti.imr.modify(|_, w| w.mr8().set_bit());

        Self { pin }
    }

    /// Raw sensor level, for alignment diagnostics.
    #[inline]
    pub fn is_low(&self) -> bool {
        self.pin.is_low()
    }

    /// Whether line 8 has a pending edge.
    #[inline]
    pub fn pending() -> bool {
        let exti = unsafe { &*pac::EXTI::ptr() };
        exti.pr.read().pr8().bit_is_set()
    }

    /// Acknowledge the pending edge (write-one-to-clear).
    #[inline]
    pub fn clear_pending() {
        let exti = unsafe { &*pac::EXTI::ptr() };
        exti.pr.write(|w| w.pr8().set_bit());
    }

    /// Release the pin. The EXTI line stays configured but masked off.
    pub fn free(self) -> gpiob::PB8<Input<Floating>> {
        let exti = unsafe { &*pac::EXTI::ptr() };
        exti.imr.modify(|_, w| w.mr8().clear_bit());
        self.pin
    }
}
