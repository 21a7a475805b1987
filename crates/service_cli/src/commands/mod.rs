//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod create_portfolio;
pub mod risk;
