//! Concrete corpus providers

pub mod directory;
pub mod embedded;
pub mod memory;

pub use directory::DirectoryProvider;
pub use embedded::EmbeddedProvider;
pub use memory::MemoryProvider;
