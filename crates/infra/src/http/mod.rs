//! HTTP client shared by the calendar crawler and the mail notifier

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
