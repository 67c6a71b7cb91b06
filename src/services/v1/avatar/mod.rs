pub mod remove;
pub mod show;
pub mod upload;
