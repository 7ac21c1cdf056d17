pub mod build;
pub mod vendor;
