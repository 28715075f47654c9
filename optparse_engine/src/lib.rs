//! Engine module for `optparse`.
//! See [documentation root](https://docs.rs/optparse/latest/optparse/index.html) for full details.
#![deny(missing_docs)]
mod coerce;
mod compiler;
mod constant;
mod expander;
mod handler;
mod model;
mod parser;
mod registry;

pub use coerce::*;
pub use compiler::{HandlerKind, SpecError};
pub use expander::ArgumentList;
pub use handler::*;
pub use model::*;
pub use parser::*;
pub use registry::{OptionDef, Registry};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
