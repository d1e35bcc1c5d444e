//! Typed client for the weekplan API and the calendar state a front end
//! keeps between requests.

mod api;
mod state;

pub use api::*;
pub use state::*;
pub use weekplan_shared::calendar::*;
