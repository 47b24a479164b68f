#![doc = include_str!("../readme.md")]

pub mod builder;
pub mod cost;
pub mod error;
pub mod experiment;
pub mod metrics;
pub mod plan;
pub mod presets;
pub mod report;
pub mod scenario;
pub mod session;
