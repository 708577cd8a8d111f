//! The drawing-surface seam between the window controller and the canvas.

use crate::formats::ImageFormatTag;
use egui::Color32;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("no encoder for format: {0}")]
    UnsupportedFormat(String),
}

/// What the main window needs from the canvas it hosts.
pub trait DrawingSurface {
    /// Load an image file, replacing the current contents.
    fn open_image(&mut self, path: &Path) -> Result<(), SurfaceError>;
    /// Encode the current contents to `path` as `format`.
    fn save_image(&mut self, path: &Path, format: &ImageFormatTag) -> Result<(), SurfaceError>;
    /// Whether the contents changed since the last load or save.
    fn is_modified(&self) -> bool;
    fn pen_color(&self) -> Color32;
    fn set_pen_color(&mut self, color: Color32);
    fn pen_width(&self) -> u32;
    fn set_pen_width(&mut self, width: u32);
    /// Wipe the canvas to the background color.
    fn clear_image(&mut self);
}
