pub mod error;
pub mod registry;
pub mod result;
pub mod visitor;

pub use error::*;
pub use registry::*;
pub use result::*;
pub use visitor::*;
