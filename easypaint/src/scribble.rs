//! ScribbleArea - the bitmap the child draws on

use crate::formats::ImageFormatTag;
use crate::surface::{DrawingSurface, SurfaceError};
use egui::Color32;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::path::Path;

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A freehand canvas that grows with the window.
pub struct ScribbleArea {
    image: RgbaImage,
    modified: bool,
    pen_color: Rgba<u8>,
    pen_width: u32,
    /// Extra room added whenever the canvas has to grow.
    margin: u32,
    /// The part of the bitmap that has been on screen or came from a file.
    /// Saving writes this much and leaves the growth slack out.
    extent: (u32, u32),
    last_point: Option<(i32, i32)>,
    /// Bumped on every pixel change so the view knows to re-upload.
    revision: u64,
}

impl ScribbleArea {
    pub fn new(pen_color: Color32, pen_width: u32, margin: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(1, 1, BACKGROUND),
            modified: false,
            pen_color: to_rgba(pen_color),
            pen_width: pen_width.max(1),
            margin,
            extent: (1, 1),
            last_point: None,
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 { self.image.width() }
    pub fn height(&self) -> u32 { self.image.height() }
    pub fn revision(&self) -> u64 { self.revision }
    pub fn extent(&self) -> (u32, u32) { self.extent }
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Make the bitmap at least `width` x `height`. Never shrinks; existing
    /// pixels stay at the top-left and new area is background.
    pub fn ensure_size(&mut self, width: u32, height: u32) {
        self.extent = (self.extent.0.max(width), self.extent.1.max(height));
        if width <= self.width() && height <= self.height() {
            return;
        }
        let new_width = self.width().max(width.saturating_add(self.margin));
        let new_height = self.height().max(height.saturating_add(self.margin));
        self.resize_image(new_width, new_height);
    }

    fn resize_image(&mut self, width: u32, height: u32) {
        let mut grown = ImageBuffer::from_pixel(width, height, BACKGROUND);
        image::imageops::replace(&mut grown, &self.image, 0, 0);
        self.image = grown;
        self.revision += 1;
    }

    /// Pen down at `(x, y)`. Leaves a dot even if the pen never moves.
    pub fn begin_stroke(&mut self, x: i32, y: i32) {
        self.last_point = Some((x, y));
        self.draw_line(x, y, x, y);
    }

    pub fn stroke_to(&mut self, x: i32, y: i32) {
        if let Some((lx, ly)) = self.last_point {
            if (lx, ly) != (x, y) {
                self.draw_line(lx, ly, x, y);
            }
        }
        self.last_point = Some((x, y));
    }

    pub fn end_stroke(&mut self, end: Option<(i32, i32)>) {
        if let Some((x, y)) = end {
            self.stroke_to(x, y);
        }
        self.last_point = None;
    }

    pub fn is_stroking(&self) -> bool {
        self.last_point.is_some()
    }

    fn set_pixel_safe(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn draw_dot(&mut self, cx: i32, cy: i32) {
        let radius = (self.pen_width / 2) as i32;
        let color = self.pen_color;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel_safe(cx + dx, cy + dy, color);
                }
            }
        }
    }

    // Bresenham with a round pen tip stamped at each step.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.draw_dot(x, y);
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
        self.modified = true;
        self.revision += 1;
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        let pixels: Vec<Color32> = self.image.pixels()
            .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
            .collect();
        egui::ColorImage { size, pixels }
    }
}

impl DrawingSurface for ScribbleArea {
    fn open_image(&mut self, path: &Path) -> Result<(), SurfaceError> {
        let loaded = image::open(path)?.to_rgba8();
        let (old_width, old_height) = (self.width(), self.height());
        self.extent = (self.extent.0.max(loaded.width()), self.extent.1.max(loaded.height()));
        self.image = loaded;
        if self.width() < old_width || self.height() < old_height {
            self.resize_image(self.width().max(old_width), self.height().max(old_height));
        }
        self.modified = false;
        self.last_point = None;
        self.revision += 1;
        Ok(())
    }

    fn save_image(&mut self, path: &Path, format: &ImageFormatTag) -> Result<(), SurfaceError> {
        let encoder = format
            .image_format()
            .filter(|f| f.writing_enabled())
            .ok_or_else(|| SurfaceError::UnsupportedFormat(format.to_string()))?;
        let width = self.extent.0.min(self.width());
        let height = self.extent.1.min(self.height());
        let visible = image::imageops::crop_imm(&self.image, 0, 0, width, height).to_image();
        match encoder {
            // No alpha channel in JPEG.
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(visible)
                .to_rgb8()
                .save_with_format(path, encoder)?,
            _ => visible.save_with_format(path, encoder)?,
        }
        self.modified = false;
        Ok(())
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn pen_color(&self) -> Color32 {
        let [r, g, b, _] = self.pen_color.0;
        Color32::from_rgb(r, g, b)
    }

    fn set_pen_color(&mut self, color: Color32) {
        self.pen_color = to_rgba(color);
    }

    fn pen_width(&self) -> u32 {
        self.pen_width
    }

    fn set_pen_width(&mut self, width: u32) {
        self.pen_width = width.max(1);
    }

    fn clear_image(&mut self) {
        for pixel in self.image.pixels_mut() { *pixel = BACKGROUND; }
        self.modified = true;
        self.revision += 1;
    }
}

/// Pen colors are always opaque.
fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color32 = Color32::from_rgb(255, 0, 0);

    fn blank(width: u32, height: u32) -> ScribbleArea {
        let mut area = ScribbleArea::new(RED, 1, 0);
        area.ensure_size(width, height);
        area
    }

    #[test]
    fn test_new_area_is_clean() {
        let area = blank(20, 10);
        assert!(!area.is_modified());
        assert_eq!((area.width(), area.height()), (20, 10));
        assert_eq!(area.pixel(5, 5), Some(BACKGROUND));
    }

    #[test]
    fn test_stroke_draws_and_marks_modified() {
        let mut area = blank(20, 20);
        area.begin_stroke(2, 2);
        area.stroke_to(10, 2);
        area.end_stroke(Some((10, 8)));
        assert!(area.is_modified());
        assert!(!area.is_stroking());
        assert_eq!(area.pixel(6, 2), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(area.pixel(10, 5), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(area.pixel(15, 15), Some(BACKGROUND));
    }

    #[test]
    fn test_click_leaves_a_dot() {
        let mut area = blank(10, 10);
        area.set_pen_width(3);
        area.begin_stroke(5, 5);
        area.end_stroke(None);
        assert_eq!(area.pixel(5, 5), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(area.pixel(6, 5), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(area.pixel(8, 8), Some(BACKGROUND));
    }

    #[test]
    fn test_stroke_off_canvas_is_clipped() {
        let mut area = blank(10, 10);
        area.begin_stroke(-5, 5);
        area.stroke_to(20, 5);
        assert_eq!(area.pixel(0, 5), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(area.pixel(9, 5), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_ensure_size_grows_with_margin_and_keeps_pixels() {
        let mut area = ScribbleArea::new(RED, 1, 16);
        area.ensure_size(10, 10);
        assert_eq!((area.width(), area.height()), (26, 26));
        area.begin_stroke(3, 3);
        area.end_stroke(None);
        let before = area.revision();

        area.ensure_size(20, 20);
        assert_eq!((area.width(), area.height()), (26, 26));
        assert_eq!(area.revision(), before);

        area.ensure_size(40, 5);
        assert_eq!((area.width(), area.height()), (56, 26));
        assert_eq!(area.pixel(3, 3), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(area.pixel(50, 3), Some(BACKGROUND));
    }

    #[test]
    fn test_pen_settings() {
        let mut area = blank(4, 4);
        area.set_pen_color(Color32::from_rgb(1, 2, 3));
        assert_eq!(area.pen_color(), Color32::from_rgb(1, 2, 3));
        area.set_pen_width(0);
        assert_eq!(area.pen_width(), 1);
        area.set_pen_width(12);
        assert_eq!(area.pen_width(), 12);
    }

    #[test]
    fn test_clear_marks_modified() {
        let mut area = blank(8, 8);
        area.begin_stroke(4, 4);
        area.end_stroke(None);
        area.clear_image();
        assert!(area.is_modified());
        assert_eq!(area.pixel(4, 4), Some(BACKGROUND));
    }

    #[test]
    fn test_save_then_open_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.png");

        let mut area = blank(16, 16);
        area.begin_stroke(1, 1);
        area.stroke_to(14, 1);
        area.save_image(&path, &ImageFormatTag::png()).unwrap();
        assert!(!area.is_modified());

        let mut other = blank(4, 4);
        other.begin_stroke(0, 0);
        other.open_image(&path).unwrap();
        assert!(!other.is_modified());
        assert!(!other.is_stroking());
        assert_eq!((other.width(), other.height()), (16, 16));
        assert_eq!(other.pixel(7, 1), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_open_smaller_image_keeps_canvas_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.bmp");
        let mut small = blank(4, 4);
        small.save_image(&path, &ImageFormatTag::new("bmp")).unwrap();

        let mut big = blank(30, 20);
        big.open_image(&path).unwrap();
        assert_eq!((big.width(), big.height()), (30, 20));
    }

    #[test]
    fn test_save_leaves_out_growth_slack() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window.png");
        let mut area = ScribbleArea::new(RED, 1, 16);
        area.ensure_size(10, 10);
        assert_eq!((area.width(), area.height()), (26, 26));
        area.begin_stroke(9, 9);
        area.end_stroke(None);
        area.save_image(&path, &ImageFormatTag::png()).unwrap();

        let saved = image::open(&path).unwrap();
        assert_eq!((saved.width(), saved.height()), (10, 10));
        assert_eq!(saved.to_rgba8().get_pixel(9, 9), &Rgba([255, 0, 0, 255]));

        // A larger file widens what gets saved back.
        let big = dir.path().join("big.png");
        blank(40, 30).save_image(&big, &ImageFormatTag::png()).unwrap();
        area.open_image(&big).unwrap();
        assert_eq!(area.extent(), (40, 30));
        area.save_image(&path, &ImageFormatTag::png()).unwrap();
        let saved = image::open(&path).unwrap();
        assert_eq!((saved.width(), saved.height()), (40, 30));
    }

    #[test]
    fn test_save_jpeg_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.jpg");
        let mut area = blank(8, 8);
        area.save_image(&path, &ImageFormatTag::new("jpg")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.xyz");
        let mut area = blank(8, 8);
        area.begin_stroke(1, 1);
        let err = area.save_image(&path, &ImageFormatTag::new("xyz")).unwrap_err();
        assert!(matches!(err, SurfaceError::UnsupportedFormat(ref f) if f == "xyz"));
        assert!(area.is_modified());
        assert!(!path.exists());
    }

    #[test]
    fn test_open_missing_file_fails_without_change() {
        let mut area = blank(8, 8);
        area.begin_stroke(1, 1);
        assert!(area.open_image(Path::new("/definitely/not/here.png")).is_err());
        assert!(area.is_modified());
        assert_eq!((area.width(), area.height()), (8, 8));
    }
}
