//! Turning free-form delimited text into typed cell values

mod convert;
mod tokenize;
mod validate;

pub use convert::convert;
pub use tokenize::{tokenize, SEPARATORS};
pub use validate::{validate, ILLEGAL_CHARACTERS};
