//! Recap delivery through an HTTP mail API

pub mod client;

pub use client::{HttpMailer, MailMessage};
