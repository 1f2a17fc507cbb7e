//! The insight request/response contract.
//!
//! - [`build_prompt`] renders a check-in into the generator prompt.
//! - [`parse_insight`] decodes whatever text comes back.
//! - [`fallback_insight`] answers locally when the generator can't.

mod fallback;
mod parse;
mod prompt;

pub use fallback::*;
pub use parse::{parse_insight, ParseError};
pub use prompt::{build_prompt, ACTION_CATALOG};
