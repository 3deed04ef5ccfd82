// src/arxiv/mod.rs
pub mod client;
pub mod models;

#[allow(unused_imports)]
pub use models::{ArchiveInfo, ArxivId};
