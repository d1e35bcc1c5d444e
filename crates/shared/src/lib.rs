pub mod calendar;
mod error;
mod response;
pub mod week;

pub use error::*;
pub use response::*;
