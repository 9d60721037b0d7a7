//! # Posts Shared
//!
//! Wire types for the posts RPC surface, shared by the server and its clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
