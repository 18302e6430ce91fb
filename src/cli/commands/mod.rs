//! One module per top-level action.

pub mod generate;
pub mod remove;
pub mod search;
