//! Domain types

pub mod habit;
pub mod notification;
pub mod stats;

pub use habit::*;
pub use notification::*;
pub use stats::*;
