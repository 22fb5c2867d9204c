pub mod auth;
pub mod browse;
pub mod form;
pub mod generate;
mod prompt;
pub mod records;

pub use prompt::Prompt;
