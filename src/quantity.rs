#[macro_use]
mod macros;

pub mod charge;
pub mod current;
pub mod time;
mod zero;

pub use self::zero::Zero;
