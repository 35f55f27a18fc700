//! Aspect classes and the image sizes each one offers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Image shape chosen before picking a concrete size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectClass {
    /// Square images.
    #[default]
    Square,
    /// Landscape images.
    Wide,
    /// Portrait images.
    Tall,
}

/// Every size the form can submit, in display order.
pub const ALL_SIZES: &[ImageSize] = &[
    ImageSize::S1024x1024,
    ImageSize::S1792x1024,
    ImageSize::S1024x576,
    ImageSize::S1024x1792,
    ImageSize::S576x1024,
];

/// A permitted `WxH` size string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    /// `1024x1024`
    #[serde(rename = "1024x1024")]
    S1024x1024,
    /// `1792x1024`
    #[serde(rename = "1792x1024")]
    S1792x1024,
    /// `1024x576`
    #[serde(rename = "1024x576")]
    S1024x576,
    /// `1024x1792`
    #[serde(rename = "1024x1792")]
    S1024x1792,
    /// `576x1024`
    #[serde(rename = "576x1024")]
    S576x1024,
}

impl AspectClass {
    /// Sizes offered while this class is selected. The first entry is the default.
    #[must_use]
    pub fn size_options(self) -> &'static [ImageSize] {
        match self {
            Self::Square => &[ImageSize::S1024x1024],
            Self::Wide => &[ImageSize::S1792x1024, ImageSize::S1024x576],
            Self::Tall => &[ImageSize::S1024x1792, ImageSize::S576x1024],
        }
    }

    /// The size selected when the class is first chosen.
    #[must_use]
    pub fn default_size(self) -> ImageSize {
        match self {
            Self::Square => ImageSize::S1024x1024,
            Self::Wide => ImageSize::S1792x1024,
            Self::Tall => ImageSize::S1024x1792,
        }
    }

    /// Whether `size` may be submitted while this class is selected.
    #[must_use]
    pub fn offers(self, size: ImageSize) -> bool {
        size.aspect() == self
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Wide => "wide",
            Self::Tall => "tall",
        }
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectClass {
    type Err = FormError;

    /// Accepts the English names and the Korean surface labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "square" | "정사각형" => Ok(Self::Square),
            "wide" | "가로" => Ok(Self::Wide),
            "tall" | "세로" => Ok(Self::Tall),
            other => Err(FormError::UnknownAspect(other.to_string())),
        }
    }
}

impl ImageSize {
    /// The size string sent to the provider.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S1024x1024 => "1024x1024",
            Self::S1792x1024 => "1792x1024",
            Self::S1024x576 => "1024x576",
            Self::S1024x1792 => "1024x1792",
            Self::S576x1024 => "576x1024",
        }
    }

    /// The aspect class this size belongs to.
    #[must_use]
    pub fn aspect(self) -> AspectClass {
        match self {
            Self::S1024x1024 => AspectClass::Square,
            Self::S1792x1024 | Self::S1024x576 => AspectClass::Wide,
            Self::S1024x1792 | Self::S576x1024 => AspectClass::Tall,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_SIZES
            .iter()
            .copied()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| FormError::UnknownSize(s.to_string()))
    }
}

/// Join the size options of a class for display, e.g. `1792x1024, 1024x576`.
#[must_use]
pub fn format_options(aspect: AspectClass) -> String {
    aspect.size_options().iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option_strings(aspect: AspectClass) -> Vec<&'static str> {
        aspect.size_options().iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn square_options() {
        assert_eq!(option_strings(AspectClass::Square), vec!["1024x1024"]);
    }

    #[test]
    fn wide_options() {
        assert_eq!(option_strings(AspectClass::Wide), vec!["1792x1024", "1024x576"]);
    }

    #[test]
    fn tall_options() {
        assert_eq!(option_strings(AspectClass::Tall), vec!["1024x1792", "576x1024"]);
    }

    #[test]
    fn options_never_leak_across_classes() {
        for aspect in [AspectClass::Square, AspectClass::Wide, AspectClass::Tall] {
            for size in aspect.size_options() {
                assert!(ALL_SIZES.contains(size));
                assert_eq!(size.aspect(), aspect);
            }
        }
        assert!(!AspectClass::Wide.offers(ImageSize::S1024x1024));
        assert!(!AspectClass::Wide.offers(ImageSize::S576x1024));
    }

    #[test]
    fn default_size_is_first_option() {
        for aspect in [AspectClass::Square, AspectClass::Wide, AspectClass::Tall] {
            assert_eq!(aspect.size_options()[0], aspect.default_size());
        }
    }

    #[test]
    fn parse_aspect_labels() {
        assert_eq!("square".parse::<AspectClass>().unwrap(), AspectClass::Square);
        assert_eq!(" Wide ".parse::<AspectClass>().unwrap(), AspectClass::Wide);
        assert_eq!("세로".parse::<AspectClass>().unwrap(), AspectClass::Tall);
        assert_eq!("정사각형".parse::<AspectClass>().unwrap(), AspectClass::Square);
        assert!("panorama".parse::<AspectClass>().is_err());
    }

    #[test]
    fn parse_sizes() {
        assert_eq!("1024x576".parse::<ImageSize>().unwrap(), ImageSize::S1024x576);
        assert!("1536x1024".parse::<ImageSize>().is_err());
        assert!("big".parse::<ImageSize>().is_err());
    }

    #[test]
    fn size_serializes_as_wire_string() {
        let json = serde_json::to_string(&ImageSize::S1792x1024).unwrap();
        assert_eq!(json, "\"1792x1024\"");
    }

    #[test]
    fn format_options_joins() {
        assert_eq!(format_options(AspectClass::Tall), "1024x1792, 576x1024");
    }
}
