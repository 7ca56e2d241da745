//! HTTP route handlers

pub mod flip;
pub mod matching;
pub mod quiz;
pub mod sets;
