pub mod errors;
pub mod puzzle;
pub mod session;

// Re-export all types
pub use errors::*;
pub use puzzle::*;
pub use session::*;
