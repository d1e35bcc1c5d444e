mod command;
mod query;
mod row;

pub use command::*;
pub use query::*;
pub use weekplan_shared::calendar::*;
