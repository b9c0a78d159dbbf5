//! Embedding generation for student questions

pub mod client;

pub use client::EmbeddingClient;
