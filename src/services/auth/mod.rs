pub mod access_jwt;
pub mod claims;
pub mod factory;
pub mod identity;

#[cfg(test)]
pub mod test_support;

pub use access_jwt::{AuthService, VerifyError};
pub use claims::UserRole;
pub use factory::build_auth_service;
pub use identity::build_identity;
