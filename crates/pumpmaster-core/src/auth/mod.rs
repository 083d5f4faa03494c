//! Authentication domain: identity model, token codec, collaborator traits.

pub mod model;
pub mod service;
pub mod store;
pub mod token;

pub use model::{AuthSuccess, LoginCredentials, Permission, Role, Session, User};
pub use service::AuthService;
pub use store::TokenStore;
pub use token::TokenClaims;
