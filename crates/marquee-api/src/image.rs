//! Image asset URL construction.
//!
//! The catalog returns opaque image paths (`/abc.jpg`); the displayable URL
//! is `IMAGE_BASE_URL/{size}{path}`. No request is made here.

use std::fmt;
use std::str::FromStr;

/// Image host base URL.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Rendition size requested from the image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Small poster (w185).
    PosterSmall,
    /// Medium poster (w342).
    PosterMedium,
    /// Large poster (w500).
    PosterLarge,
    /// Small backdrop (w780).
    BackdropSmall,
    /// Large backdrop (w1280).
    BackdropLarge,
    /// Cast profile photo (w185).
    Profile,
}

impl ImageSize {
    /// Every size, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::PosterSmall,
        Self::PosterMedium,
        Self::PosterLarge,
        Self::BackdropSmall,
        Self::BackdropLarge,
        Self::Profile,
    ];

    /// Size token understood by the image host.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::PosterSmall | Self::Profile => "w185",
            Self::PosterMedium => "w342",
            Self::PosterLarge => "w500",
            Self::BackdropSmall => "w780",
            Self::BackdropLarge => "w1280",
        }
    }

    /// Kebab-case name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PosterSmall => "poster-small",
            Self::PosterMedium => "poster-medium",
            Self::PosterLarge => "poster-large",
            Self::BackdropSmall => "backdrop-small",
            Self::BackdropLarge => "backdrop-large",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown size name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownImageSize(pub String);

impl fmt::Display for UnknownImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown image size: {}", self.0)
    }
}

impl std::error::Error for UnknownImageSize {}

impl FromStr for ImageSize {
    type Err = UnknownImageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.name() == s)
            .ok_or_else(|| UnknownImageSize(String::from(s)))
    }
}

/// Builds the image URL for `path` at `size`.
///
/// Returns an empty string when the path is absent or empty.
#[must_use]
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => {
            let p = p.trim_start_matches('/');
            format!("{IMAGE_BASE_URL}/{}/{p}", size.token())
        }
        _ => String::new(),
    }
}

/// Poster URL at medium size.
#[must_use]
pub fn poster_url(path: Option<&str>) -> String {
    image_url(path, ImageSize::PosterMedium)
}

/// Backdrop URL at large size.
#[must_use]
pub fn backdrop_url(path: Option<&str>) -> String {
    image_url(path, ImageSize::BackdropLarge)
}

/// Cast profile photo URL.
#[must_use]
pub fn profile_url(path: Option<&str>) -> String {
    image_url(path, ImageSize::Profile)
}
