//! sqlgate - an authenticated HTTP gateway for SQL and key/value access to
//! SQLite, plus the client that talks to it.

pub mod auth;
pub mod cli;
pub mod client;
pub mod http_server;
pub mod observability;
pub mod protocol;
pub mod store;
