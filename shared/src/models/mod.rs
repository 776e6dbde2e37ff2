//! Domain models for the Espresso Shot Dialer

mod evaluation;
mod history;
mod shot;

pub use evaluation::*;
pub use history::*;
pub use shot::*;
