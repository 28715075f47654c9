mod base;
mod driver;
mod interface;
mod session;

pub use base::*;
pub use driver::MergePolicy;
pub use interface::*;
pub use session::*;
