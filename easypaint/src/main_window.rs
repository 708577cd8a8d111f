//! The main window controller.
//!
//! `MainWindow` owns the drawing surface and turns triggered actions into
//! calls on it. It knows nothing about frames or painting; the egui adapter
//! in `app.rs` feeds it actions and renders whatever it asks for.

use crate::actions::{ActionId, ActionTable};
use crate::dialogs::{Dialogs, SaveChoice, SaveFilter};
use crate::formats::ImageFormatTag;
use crate::surface::DrawingSurface;
use egui::Color32;
use std::ops::RangeInclusive;
use std::path::PathBuf;

pub const WINDOW_TITLE: &str = "Easy Paint";
pub const PEN_WIDTH_RANGE: RangeInclusive<u32> = 1..=50;

/// Stem of the file name offered by the save dialog.
const DEFAULT_FILE_STEM: &str = "easy-p1";
const UNSAVED_MESSAGE: &str = "The image has been modified.\nDo you want to save your changes?";
pub const ABOUT_TEXT: &str = "Easy Paint is a simple program to allow a child to use a mouse.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuBarState {
    #[default]
    Hidden,
    Visible,
}

impl MenuBarState {
    pub fn toggled(self) -> Self {
        match self {
            MenuBarState::Hidden => MenuBarState::Visible,
            MenuBarState::Visible => MenuBarState::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        self == MenuBarState::Visible
    }
}

/// An in-window dialog waiting for the user. The payload is the value being
/// edited, seeded from the surface when the dialog opened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PendingDialog {
    PenColor(Color32),
    PenWidth(u32),
    About,
}

/// What the adapter has to do once an action has run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// Ask the window to close; the close itself goes through
    /// [`MainWindow::close_request`].
    CloseWindow,
}

pub struct MainWindow<S, D> {
    surface: S,
    dialogs: D,
    actions: ActionTable,
    menu_bar: MenuBarState,
    pending: Option<PendingDialog>,
    working_dir: PathBuf,
}

impl<S: DrawingSurface, D: Dialogs> MainWindow<S, D> {
    /// `formats` is the encoder list queried at startup; one save action is
    /// registered per entry.
    pub fn new(surface: S, dialogs: D, formats: &[ImageFormatTag], working_dir: PathBuf) -> Self {
        Self {
            surface,
            dialogs,
            actions: ActionTable::new(formats),
            menu_bar: MenuBarState::Hidden,
            pending: None,
            working_dir,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn menu_bar(&self) -> MenuBarState {
        self.menu_bar
    }

    pub fn pending_dialog(&self) -> Option<PendingDialog> {
        self.pending
    }

    pub fn pending_dialog_mut(&mut self) -> Option<&mut PendingDialog> {
        self.pending.as_mut()
    }

    /// Run the handler registered for `id`.
    pub fn trigger(&mut self, id: ActionId) -> ActionOutcome {
        log::debug!("action {:?}", id);
        match id {
            ActionId::Open => self.open(),
            ActionId::SaveAs(_) => {
                self.save(id);
            }
            ActionId::Exit => return ActionOutcome::CloseWindow,
            ActionId::PenColor => self.pen_color(),
            ActionId::PenWidth => self.pen_width(),
            ActionId::ClearScreen => self.clear_screen(),
            ActionId::ToggleMenu => self.toggle_menu(),
            ActionId::About => self.about(),
            ActionId::AboutFramework => self.about_framework(),
        }
        ActionOutcome::Done
    }

    /// Whether the window may close now.
    pub fn close_request(&mut self) -> bool {
        let accepted = self.maybe_save();
        if !accepted {
            log::info!("close cancelled");
        }
        accepted
    }

    pub fn open(&mut self) {
        if !self.maybe_save() {
            return;
        }
        let Some(path) = self.dialogs.pick_open_path("Open File", &self.working_dir) else {
            return;
        };
        match self.surface.open_image(&path) {
            Ok(()) => log::info!("opened {}", path.display()),
            Err(e) => log::warn!("failed to open {}: {}", path.display(), e),
        }
    }

    /// Save in the format attached to the action `id`.
    pub fn save(&mut self, id: ActionId) -> bool {
        match self.actions.format_of(id).cloned() {
            Some(format) => self.save_file(&format),
            None => {
                log::warn!("{:?} carries no image format", id);
                false
            }
        }
    }

    pub fn save_file(&mut self, format: &ImageFormatTag) -> bool {
        let initial = self.working_dir.join(format!("{}.{}", DEFAULT_FILE_STEM, format));
        let filter = SaveFilter::for_format(format);
        let Some(path) = self.dialogs.pick_save_path("Save As", &initial, &filter) else {
            return false;
        };
        match self.surface.save_image(&path, format) {
            Ok(()) => {
                log::info!("saved {} as {}", path.display(), format);
                true
            }
            Err(e) => {
                log::warn!("failed to save {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn pen_color(&mut self) {
        self.pending = Some(PendingDialog::PenColor(self.surface.pen_color()));
    }

    /// Close the pen color dialog; `None` means it was cancelled.
    pub fn finish_pen_color(&mut self, color: Option<Color32>) {
        if !matches!(self.pending, Some(PendingDialog::PenColor(_))) {
            return;
        }
        self.pending = None;
        if let Some(color) = color {
            self.surface.set_pen_color(color);
        }
    }

    pub fn pen_width(&mut self) {
        let width = self.surface.pen_width().clamp(*PEN_WIDTH_RANGE.start(), *PEN_WIDTH_RANGE.end());
        self.pending = Some(PendingDialog::PenWidth(width));
    }

    /// Close the pen width dialog; `None` means it was cancelled.
    pub fn finish_pen_width(&mut self, width: Option<u32>) {
        if !matches!(self.pending, Some(PendingDialog::PenWidth(_))) {
            return;
        }
        self.pending = None;
        if let Some(width) = width {
            self.surface
                .set_pen_width(width.clamp(*PEN_WIDTH_RANGE.start(), *PEN_WIDTH_RANGE.end()));
        }
    }

    pub fn clear_screen(&mut self) {
        self.surface.clear_image();
    }

    pub fn toggle_menu(&mut self) {
        self.menu_bar = self.menu_bar.toggled();
    }

    pub fn about(&mut self) {
        self.pending = Some(PendingDialog::About);
    }

    pub fn about_framework(&mut self) {
        self.dialogs.about_framework();
    }

    /// Close whatever in-window dialog is open without applying it.
    pub fn dismiss_dialog(&mut self) {
        self.pending = None;
    }

    /// Offer to save a modified canvas. Returns false if the user backed out
    /// or the save did not happen.
    pub fn maybe_save(&mut self) -> bool {
        if !self.surface.is_modified() {
            return true;
        }
        match self.dialogs.confirm_unsaved_changes(WINDOW_TITLE, UNSAVED_MESSAGE) {
            SaveChoice::Save => self.save_file(&ImageFormatTag::png()),
            SaveChoice::Discard => true,
            SaveChoice::Cancel => false,
        }
    }
}
