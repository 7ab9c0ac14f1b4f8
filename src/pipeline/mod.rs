pub mod import;
pub mod extraction;
pub mod metadata;
pub mod processor;
