// src/extractors/mod.rs
pub mod category;
pub mod collector;
pub mod normalize;
pub mod patterns;
pub mod walker;

// Re-export key extraction types for convenience
pub use category::Category;
pub use collector::SnippetCollector;
pub use walker::{walk_folder, WalkReport};
