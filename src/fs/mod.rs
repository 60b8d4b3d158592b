//! Local filesystem backend.

pub mod walker;

pub use walker::traverse_dir;
