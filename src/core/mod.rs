// SkillSleuth - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or the filesystem directly.

pub mod classifier;
pub mod export;
pub mod extractor;
pub mod model;
pub mod reader;
pub mod report;
