pub mod file;
pub mod json;
