//! Domain layer - pure dialogue logic with no I/O.

pub mod dialogue;
pub mod foundation;
pub mod profile;
