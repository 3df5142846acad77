pub mod access;
pub mod authority;
mod exempt;

pub use exempt::RouteExemptions;
