//! Role-based access control shared by the factory.

mod registry;

pub use registry::AccessRegistry;
