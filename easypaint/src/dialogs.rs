//! Blocking modal prompts used by the main window.
//!
//! The window talks to a [`Dialogs`] implementation rather than to a
//! toolkit directly. [`NativeDialogs`] shows the platform's own dialogs.

use crate::formats::ImageFormatTag;
use std::path::{Path, PathBuf};

/// The three answers to "save your changes?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// One entry of a save dialog's file-type list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveFilter {
    pub label: String,
    pub extensions: Vec<String>,
}

impl SaveFilter {
    /// `"PNG Files"` matching `*.png`.
    pub fn for_format(format: &ImageFormatTag) -> Self {
        Self {
            label: format!("{} Files", format.label()),
            extensions: vec![format.as_str().to_string()],
        }
    }
}

pub trait Dialogs {
    /// Ask for an existing file to open. `None` when cancelled.
    fn pick_open_path(&mut self, title: &str, directory: &Path) -> Option<PathBuf>;
    /// Ask for a destination, pre-filled with `initial`. `None` when cancelled.
    fn pick_save_path(&mut self, title: &str, initial: &Path, filter: &SaveFilter) -> Option<PathBuf>;
    fn confirm_unsaved_changes(&mut self, title: &str, message: &str) -> SaveChoice;
    /// Show what the UI toolkit is and which version is linked.
    fn about_framework(&mut self);
}

const SAVE_LABEL: &str = "Save";
const DISCARD_LABEL: &str = "Discard";
const CANCEL_LABEL: &str = "Cancel";

const FRAMEWORK_INFO: &str = "Easy Paint is built with egui and eframe 0.27, \
an immediate mode GUI library for Rust.\n\nImages are read and written with the image crate.";

/// Native platform dialogs through `rfd`.
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_open_path(&mut self, title: &str, directory: &Path) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .set_directory(directory)
            .pick_file()
            .filter(|p| !p.as_os_str().is_empty())
    }

    fn pick_save_path(&mut self, title: &str, initial: &Path, filter: &SaveFilter) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter(filter.label.as_str(), filter.extensions.as_slice());
        if let Some((label, extensions)) = all_files_filter() {
            dialog = dialog.add_filter(label, extensions);
        }
        if let Some(dir) = initial.parent() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = initial.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        dialog.save_file().filter(|p| !p.as_os_str().is_empty())
    }

    fn confirm_unsaved_changes(&mut self, title: &str, message: &str) -> SaveChoice {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::YesNoCancelCustom(
                SAVE_LABEL.to_string(),
                DISCARD_LABEL.to_string(),
                CANCEL_LABEL.to_string(),
            ))
            .show();
        choice_from_result(result)
    }

    fn about_framework(&mut self) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title("About egui")
            .set_description(FRAMEWORK_INFO)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

// GTK and the desktop portal turn "*" into "*.*", which hides files without
// an extension, so the catch-all is only offered where it means what it says.
fn all_files_filter() -> Option<(&'static str, &'static [&'static str])> {
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        Some(("All Files", &["*"]))
    } else {
        None
    }
}

// Backends report custom buttons either by label or as Yes/No/Cancel.
fn choice_from_result(result: rfd::MessageDialogResult) -> SaveChoice {
    match result {
        rfd::MessageDialogResult::Yes => SaveChoice::Save,
        rfd::MessageDialogResult::No => SaveChoice::Discard,
        rfd::MessageDialogResult::Custom(label) if label == SAVE_LABEL => SaveChoice::Save,
        rfd::MessageDialogResult::Custom(label) if label == DISCARD_LABEL => SaveChoice::Discard,
        _ => SaveChoice::Cancel,
    }
}
