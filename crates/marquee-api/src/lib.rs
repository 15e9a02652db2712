//! Movie catalog client library for marquee.
//!
//! Provides the TMDB catalog client, image URL helpers and the
//! locale-to-API-language mapping.

/// TMDB catalog API client.
pub mod catalog;

/// Image asset URL construction.
pub mod image;

/// Locale code to API language mapping.
pub mod locale;
