pub mod error;
pub(crate) mod util;
