//! EcoVision core: synthetic environmental series, threshold assessment, CSV
//! export and the conservation chat assistant.

pub mod analysis;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod generation;
pub mod overview;
pub mod timeline;
