//! External service integrations
//!
//! - `calendar`: crawls the public booking calendar for open days
//! - `mail`: sends recaps through an HTTP mail API

pub mod calendar;
pub mod mail;
