// Sample path: the bundled CSV with pre-rendered pitches, browsed by name.

pub mod cache;
pub mod handlers;
