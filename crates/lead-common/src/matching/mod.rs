pub mod exact;
pub mod keyword;
pub mod ranking;
pub mod scoring;
