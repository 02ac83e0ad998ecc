//! Endpoint groups, each an `impl` block on [`crate::ApiClient`].

mod admin;
mod auth;
mod catalog;
mod orders;
mod payments;
mod wallet;
