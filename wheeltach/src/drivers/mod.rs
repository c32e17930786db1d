pub mod font;
pub mod pcd8544;
pub mod seven_segment;

pub use pcd8544::Pcd8544;
pub use seven_segment::SevenSegment;
