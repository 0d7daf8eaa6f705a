// SkillSleuth - app/mod.rs
//
// Application layer: orchestration of a single analysis run.
// Dependencies: core and platform layers.

pub mod analyze;
