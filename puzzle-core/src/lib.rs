pub mod events;
pub mod guess;
pub mod session;

// Re-export main components
pub use events::*;
pub use guess::*;
pub use session::*;
