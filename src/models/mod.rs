pub mod catalog;
pub mod schedule;
pub mod selection;
pub mod time;

pub use catalog::*;
pub use schedule::*;
pub use selection::*;
pub use time::*;
