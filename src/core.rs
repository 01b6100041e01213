pub mod decision;
pub mod locate;
pub mod manifest;
pub mod metadata;
pub mod naming;
pub mod sync;
