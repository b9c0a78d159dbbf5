//! Chat completion client for answer generation

pub mod client;

pub use client::ChatClient;
pub use client::ChatMessage;
