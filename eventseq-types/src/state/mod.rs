pub mod bank;
pub mod step;

pub use bank::*;
pub use step::*;
