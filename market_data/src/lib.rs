pub mod bar;
pub mod config;
pub mod error;
pub mod logger;
pub mod source;
pub mod store;
pub mod validate;
