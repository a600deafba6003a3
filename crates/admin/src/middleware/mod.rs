//! HTTP middleware for the admin console.

pub mod auth;

pub use auth::RequireAuth;
