pub mod capabilities;
pub mod collections;
pub mod common;
pub mod conformance;
pub mod landing;

pub use common::*;
