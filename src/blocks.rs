//! Convenient mod collecting all blocks for import.
pub use crate::multiply_const::{KernelChoice, MultiplyConstBuilder, MultiplyConstV};
