//! HTTP integration tests over the in-memory store.

mod auth_test;
mod crud_test;
mod helpers;
mod jornada_test;
mod pagination_test;
