pub mod auth;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod session;
pub mod store;
pub mod tasks;
