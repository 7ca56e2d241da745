//! Set storage and study session management

pub mod sessions;
pub mod sets;
