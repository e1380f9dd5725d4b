pub mod analyzers;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod model;
pub mod output;
pub mod parser;
pub mod store;
