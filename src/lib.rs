pub mod common;
pub mod scheduler;

pub use common::*;
pub use scheduler::*;
