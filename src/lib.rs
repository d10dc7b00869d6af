pub mod error;
pub mod formula;
pub mod parse;
pub mod sat;
pub mod semantics;
pub mod syntax;
mod token;
pub mod utils;

pub use error::{LogicError, ParseError};
pub use formula::Formula;
pub use sat::{Entailment, Premises, Search};
pub use semantics::{Valuation, Valuations};
