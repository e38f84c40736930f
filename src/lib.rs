// Applications Dashboard - Library root for testing

pub mod config;
pub mod dashboard;
pub mod error;
pub mod http_client;
pub mod models;
pub mod storage;
