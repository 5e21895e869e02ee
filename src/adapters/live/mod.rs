//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;

pub use clock::SystemClock;
pub use filesystem::DiskFileSystem;
