pub mod cli;
pub mod output;

pub use cli::*;
pub use output::*;
