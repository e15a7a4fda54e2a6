//! Macro for implementing Display and FromStr for string-backed enums
//!
//! Habit recurrences and notification permission values arrive as plain
//! strings from the API and from configuration. This macro keeps their
//! textual form in one place and parses case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use streakline_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mood {
//!     Good,
//!     Meh,
//! }
//!
//! impl_domain_enum_conversions!(Mood {
//!     Good => "good",
//!     Meh => "meh",
//! });
//!
//! assert_eq!("GOOD".parse::<Mood>(), Ok(Mood::Good));
//! ```

/// Implements Display and FromStr traits for string-backed enums
///
/// - Display writes the canonical lowercase form
/// - FromStr accepts any casing and surrounding whitespace
#[macro_export]
macro_rules! impl_domain_enum_conversions {
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

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
