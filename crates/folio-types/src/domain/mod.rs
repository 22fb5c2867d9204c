pub mod blog;
pub mod generate;
pub mod portfolio;
pub mod resource;

pub use blog::*;
pub use generate::*;
pub use portfolio::*;
pub use resource::*;
