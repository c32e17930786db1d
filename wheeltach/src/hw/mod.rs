pub mod adc;
pub mod exti;
pub mod led;
pub mod pins;
pub mod spi;
pub mod timer;
pub mod usart;

pub use adc::Adc;
pub use exti::IrInput;
pub use led::Led;
pub use pins::BoardPins;
pub use spi::ChipSelect;
pub use spi::SpiBus;
pub use timer::WindowTimer;
pub use usart::Usart;
