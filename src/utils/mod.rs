pub mod diagnostics;
pub mod rational;

pub use diagnostics::{Diagnostic, Reporter};
