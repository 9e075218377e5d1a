//! Unsplash API client.

mod client;
mod dto;

pub use client::UnsplashClient;
