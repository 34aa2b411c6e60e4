pub mod builder;
pub mod model;
pub mod serialize;

pub use builder::build;
pub use model::CapabilityDocument;
pub use serialize::serialize;
