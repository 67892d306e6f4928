//! Macro for implementing Display and FromStr for label enums
//!
//! Decision reasons and delivery outcomes are logged and printed as stable
//! snake_case labels. This macro provides both directions of the conversion
//! from a single mapping, with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use slotwatch_domain::impl_domain_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum PageState {
//!     HasNext,
//!     Last,
//! }
//!
//! impl_domain_label_conversions!(PageState {
//!     HasNext => "has_next",
//!     Last => "last",
//! });
//!
//! assert_eq!(PageState::Last.to_string(), "last");
//! ```

/// Implements Display and FromStr traits for label enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their label
/// - FromStr trait: parses case-insensitive labels to enum variants
#[macro_export]
macro_rules! impl_domain_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
