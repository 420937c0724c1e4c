//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Argon2id password hashing and verification
//! - Signed access token issuance and validation
//! - Bearer-token authorization of protected requests
//! - E-mail/password login
//! - AuthedUser extractor for protected routes

pub mod credentials;
pub mod errors;
pub mod extractors;
pub mod gate;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod password;
pub mod routes;
pub mod service;
pub mod token;


pub use errors::AuthError;
pub use extractors::AuthedUser;
pub use lookup::UserLookup;
pub use routes::auth_routes;
pub use service::AuthService;
