pub mod counts;
pub mod label;

pub use counts::{FrameTally, LabelCounts};
pub use label::Label;
