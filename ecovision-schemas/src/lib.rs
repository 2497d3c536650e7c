//! Shared data types for the EcoVision dashboard: selectors, city baselines,
//! per-family metric records, threshold rules and chat transcript turns.

pub mod chat;
pub mod city;
pub mod file_formats;
pub mod record;
pub mod rule;
pub mod selection;
pub mod series;
