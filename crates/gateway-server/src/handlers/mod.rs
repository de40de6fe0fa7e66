//! HTTP route handlers for the gateway (spec §4.1 Request Router).

pub mod chat;
pub mod embed;
pub mod generate;
pub mod stubs;
pub mod tags;
