pub use super::session_snapshots::Entity as SessionSnapshots;
