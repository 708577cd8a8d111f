//! Image formats the canvas can be saved as.

use image::ImageFormat;
use std::fmt;

/// A lowercase file-extension tag naming an image encoder, e.g. `png`.
///
/// Save-as actions carry one of these as their attached data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageFormatTag(String);

impl ImageFormatTag {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim_start_matches('.').to_ascii_lowercase())
    }

    /// The format used when the unsaved-changes prompt saves.
    pub fn png() -> Self {
        Self::new("png")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case form used in menu and filter labels.
    pub fn label(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    pub fn image_format(&self) -> Option<ImageFormat> {
        ImageFormat::from_extension(&self.0)
    }
}

impl fmt::Display for ImageFormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every format the linked encoders can write, sorted and deduplicated.
///
/// Queried once at startup; the action table is built from the result.
pub fn supported_formats() -> Vec<ImageFormatTag> {
    let mut tags: Vec<ImageFormatTag> = ImageFormat::all()
        .filter(|format| format.writing_enabled())
        .filter_map(|format| format.extensions_str().first().copied())
        .map(ImageFormatTag::new)
        .collect();

    let png = ImageFormatTag::png();
    if !tags.contains(&png) {
        tags.push(png);
    }
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tag_normalizes() {
        assert_eq!(ImageFormatTag::new(".PNG"), ImageFormatTag::png());
        assert_eq!(ImageFormatTag::new("Jpg").as_str(), "jpg");
        assert_eq!(ImageFormatTag::new("bmp").label(), "BMP");
    }

    #[test]
    fn test_tag_maps_to_encoder() {
        assert_eq!(ImageFormatTag::new("jpg").image_format(), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormatTag::png().image_format(), Some(ImageFormat::Png));
        assert_eq!(ImageFormatTag::new("nope").image_format(), None);
    }

    #[test]
    fn test_supported_formats_are_unique_and_writable() {
        let formats = supported_formats();
        let unique: HashSet<_> = formats.iter().collect();
        assert_eq!(unique.len(), formats.len());
        assert!(formats.contains(&ImageFormatTag::png()));
        assert!(formats.contains(&ImageFormatTag::new("jpg")));
        for tag in &formats {
            let format = tag.image_format().expect("tag should map back to a format");
            assert!(format.writing_enabled(), "{} is not writable", tag);
        }
    }
}
