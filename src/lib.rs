pub mod api;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod negotiate;
