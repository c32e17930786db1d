pub mod edge;
pub mod tacho;

pub use edge::EdgeDetector;
pub use tacho::{Reading, Tachometer};
