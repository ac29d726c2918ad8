//! HTTP API.

mod server;
mod v0;

pub use server::{SharedState, router, serve};
