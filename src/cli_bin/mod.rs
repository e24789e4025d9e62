//! Command-line interface layer

pub mod args;
pub mod commands;
