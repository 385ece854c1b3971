//! Tab-specific rendering.

pub mod athletes;
pub mod attendance;
