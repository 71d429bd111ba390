mod common;
mod result;

pub use common::*;
pub use result::*;
