pub mod config;
pub mod decision;
pub mod error;
pub mod metadata;
pub mod report;
