//! Request handlers.

pub mod auth;
pub mod catalog;
pub mod crud;
pub mod health;
