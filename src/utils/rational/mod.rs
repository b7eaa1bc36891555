mod rounding;

pub use rounding::{round_significant, RoundBinary};
