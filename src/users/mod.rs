//! # Users Module
//!
//! User records, their SQLite storage and the CRUD routes over them.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;
pub mod validators;


pub use models::{User, UserResponse};
pub use routes::users_routes;
pub use store::UserStore;
