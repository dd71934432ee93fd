//! # rhsenso-auth
//!
//! Login strategies, access tokens and per-resource grants.
//!
//! ## Modules
//!
//! - `jwt`: access token claims, signing and validation
//! - `password`: Argon2id hashing
//! - `permission`: the `C`/`I`/`A`/`E` grant set checked before every CRUD call
//! - `strategy`: on-premises, Windows and hosted credential verification

pub mod jwt;
pub mod password;
pub mod permission;
pub mod strategy;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use permission::PermissionSet;
pub use strategy::{AuthStrategy, LoginCredentials};
