mod args;
mod commands;
pub mod context;
mod handlers;
mod logging;
pub mod output;
pub mod types;

pub use args::{BlogCommand, Cli, Commands, PortfolioCommand};
pub use commands::run;
