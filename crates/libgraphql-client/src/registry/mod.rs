#[allow(clippy::module_inception)]
mod registry;

pub use registry::Registry;
pub use registry::RegistrationError;
