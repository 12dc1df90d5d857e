//! Domain types for the economic-calendar pipeline.

pub mod event;
pub mod filter;
pub mod result;
pub mod week;

pub use event::*;
pub use filter::*;
pub use result::*;
pub use week::*;
