pub mod compression;
pub mod config;
pub mod csv;
pub mod storage;
