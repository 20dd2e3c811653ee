pub mod config;
pub mod output;
pub mod rank;
pub mod region;
pub mod scale;
pub mod scoring;
