//! Easy Paint application — egui adapter
//!
//! Receives frames and input from eframe and forwards them to the
//! [`MainWindow`] controller. Owns only view state: the canvas texture.

use crate::actions::{ActionId, Menu, MenuItem};
use crate::dialogs::NativeDialogs;
use crate::formats::supported_formats;
use crate::main_window::{ActionOutcome, MainWindow, PendingDialog, ABOUT_TEXT, PEN_WIDTH_RANGE, WINDOW_TITLE};
use crate::scribble::ScribbleArea;
use crate::settings::PaintSettings;
use easycore::theme::{menu_bar, EasyColors};
use egui::{Context, Event, Key, KeyboardShortcut, Pos2, Rect, Sense, TextureHandle, Vec2};

pub struct EasyPaintApp {
    window: MainWindow<ScribbleArea, NativeDialogs>,
    texture: Option<TextureHandle>,
    /// Surface revision the texture was built from.
    texture_revision: Option<u64>,
}

impl EasyPaintApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: &PaintSettings) -> Self {
        Self::from_settings(settings)
    }

    fn from_settings(settings: &PaintSettings) -> Self {
        let formats = supported_formats();
        log::info!(
            "save formats: {}",
            formats.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
        );
        let surface = ScribbleArea::new(settings.pen_color32(), settings.pen_width, settings.canvas_margin);
        Self {
            window: MainWindow::new(surface, NativeDialogs, &formats, easycore::storage::working_dir()),
            texture: None,
            texture_revision: None,
        }
    }

    fn run_action(&mut self, ctx: &Context, id: ActionId) {
        if self.window.trigger(id) == ActionOutcome::CloseWindow {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// Shortcuts are read from the action table every frame, so they work
    /// with the menu bar hidden.
    fn handle_shortcuts(&mut self, ctx: &Context) {
        if self.window.pending_dialog().is_some() {
            return;
        }
        let bindings: Vec<(KeyboardShortcut, ActionId)> = self.window.actions().shortcuts().collect();
        let fired: Vec<ActionId> = ctx.input_mut(|i| {
            bindings
                .iter()
                .filter(|(shortcut, _)| consume_action_shortcut(i, shortcut))
                .map(|(_, id)| *id)
                .collect()
        });
        for id in fired {
            self.run_action(ctx, id);
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        let menus: Vec<Menu> = self.window.actions().menu_bar().cloned().collect();
        let mut clicked = None;
        menu_bar(ui, |ui| {
            for menu in &menus {
                ui.menu_button(menu.id.title(), |ui| {
                    self.render_menu_items(ui, menu, &mut clicked);
                });
            }
        });
        if let Some(id) = clicked {
            self.run_action(ui.ctx(), id);
        }
    }

    fn render_menu_items(&self, ui: &mut egui::Ui, menu: &Menu, clicked: &mut Option<ActionId>) {
        for item in &menu.items {
            match item {
                MenuItem::Action(id) => {
                    let Some(action) = self.window.actions().get(*id) else { continue };
                    let mut button = egui::Button::new(action.text.as_str());
                    if let Some(shortcut) = &action.shortcut {
                        button = button.shortcut_text(ui.ctx().format_shortcut(shortcut));
                    }
                    if ui.add(button).clicked() {
                        *clicked = Some(*id);
                        ui.close_menu();
                    }
                }
                MenuItem::Submenu(sub) => {
                    if let Some(submenu) = self.window.actions().menu(*sub) {
                        ui.menu_button(sub.title(), |ui| self.render_menu_items(ui, submenu, clicked));
                    }
                }
                MenuItem::Separator => {
                    ui.separator();
                }
            }
        }
    }

    fn update_texture(&mut self, ctx: &Context) {
        let revision = self.window.surface().revision();
        if self.texture_revision == Some(revision) && self.texture.is_some() {
            return;
        }
        let image = self.window.surface().to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST)),
        }
        self.texture_revision = Some(revision);
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        let available = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(available, Sense::click_and_drag());

        let surface = self.window.surface_mut();
        surface.ensure_size(available.width().ceil() as u32, available.height().ceil() as u32);
        let press_origin = ui.input(|i| i.pointer.press_origin());
        self.handle_drawing(available, &response, press_origin);
        self.update_texture(ctx);

        let painter = ui.painter_at(available);
        painter.rect_filled(available, 0.0, EasyColors::PAPER);
        if let Some(texture) = &self.texture {
            let surface = self.window.surface();
            let size = Vec2::new(surface.width() as f32, surface.height() as f32);
            painter.image(
                texture.id(),
                Rect::from_min_size(available.min, size),
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        if self.window.surface().is_stroking() {
            ctx.request_repaint();
        }
    }

    /// `press_origin` is where the button went down. egui only reports a
    /// drag once the pointer has left the click radius, so the stroke is
    /// anchored there and then drawn up to the current position.
    fn handle_drawing(&mut self, canvas_rect: Rect, response: &egui::Response, press_origin: Option<Pos2>) {
        let to_canvas = |pos: Pos2| {
            let rel = pos - canvas_rect.min;
            (rel.x.floor() as i32, rel.y.floor() as i32)
        };
        let point = response.interact_pointer_pos().map(to_canvas);
        let surface = self.window.surface_mut();

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some((x, y)) = press_origin.map(to_canvas).or(point) {
                surface.begin_stroke(x, y);
            }
            if let Some((x, y)) = point {
                surface.stroke_to(x, y);
            }
        } else if response.dragged_by(egui::PointerButton::Primary) && surface.is_stroking() {
            if let Some((x, y)) = point {
                surface.stroke_to(x, y);
            }
        }

        if response.drag_stopped() && surface.is_stroking() {
            surface.end_stroke(point);
        }

        if response.clicked() {
            if let Some((x, y)) = point {
                surface.begin_stroke(x, y);
                surface.end_stroke(None);
            }
        }
    }

    fn render_pending_dialog(&mut self, ctx: &Context) {
        let Some(pending) = self.window.pending_dialog_mut() else { return };
        let mut confirmed = false;
        let mut cancelled = false;

        match pending {
            PendingDialog::PenColor(color) => {
                egui::Window::new("Pen Color")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        egui::color_picker::color_picker_color32(ui, color, egui::color_picker::Alpha::Opaque);
                        ui.add_space(8.0);
                        dialog_buttons(ui, &mut confirmed, &mut cancelled);
                    });
            }
            PendingDialog::PenWidth(width) => {
                egui::Window::new("Scribble")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label("Select pen width:");
                        ui.add(egui::Slider::new(width, PEN_WIDTH_RANGE).step_by(1.0));
                        ui.add_space(8.0);
                        dialog_buttons(ui, &mut confirmed, &mut cancelled);
                    });
            }
            PendingDialog::About => {
                egui::Window::new(format!("About {}", WINDOW_TITLE))
                    .collapsible(false)
                    .resizable(false)
                    .default_width(320.0)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading(WINDOW_TITLE);
                            ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                            ui.add_space(8.0);
                            ui.label(ABOUT_TEXT);
                            ui.add_space(8.0);
                            if ui.button("OK").clicked() {
                                cancelled = true;
                            }
                        });
                    });
            }
        }

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            cancelled = true;
        }

        let value = *pending;
        if confirmed {
            match value {
                PendingDialog::PenColor(color) => self.window.finish_pen_color(Some(color)),
                PendingDialog::PenWidth(width) => self.window.finish_pen_width(Some(width)),
                PendingDialog::About => self.window.dismiss_dialog(),
            }
        } else if cancelled {
            match value {
                PendingDialog::PenColor(_) => self.window.finish_pen_color(None),
                PendingDialog::PenWidth(_) => self.window.finish_pen_width(None),
                PendingDialog::About => self.window.dismiss_dialog(),
            }
        }
    }
}

fn dialog_buttons(ui: &mut egui::Ui, confirmed: &mut bool, cancelled: &mut bool) {
    ui.horizontal(|ui| {
        if ui.button("Cancel").clicked() { *cancelled = true; }
        if ui.button("OK").clicked() { *confirmed = true; }
    });
}

/// Consume `shortcut` if it was pressed this frame.
///
/// egui-winit turns Cmd+C/X/V into clipboard events instead of key events,
/// so those combinations are matched against the clipboard events too.
fn consume_action_shortcut(input: &mut egui::InputState, shortcut: &KeyboardShortcut) -> bool {
    if input.consume_shortcut(shortcut) {
        return true;
    }
    if shortcut.modifiers != egui::Modifiers::COMMAND {
        return false;
    }
    let clipboard_event = |e: &Event| match shortcut.logical_key {
        Key::C => matches!(e, Event::Copy),
        Key::X => matches!(e, Event::Cut),
        Key::V => matches!(e, Event::Paste(_)),
        _ => false,
    };
    let before = input.events.len();
    input.events.retain(|e| !clipboard_event(e));
    input.events.len() != before
}

impl EasyPaintApp {
    /// One frame of the window, independent of the eframe host.
    fn ui(&mut self, ctx: &Context) {
        easycore::theme::consume_special_keys(ctx);
        self.handle_shortcuts(ctx);

        if self.window.menu_bar().is_visible() {
            egui::TopBottomPanel::top("menu").show(ctx, |ui| self.render_menu_bar(ui));
        }
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.render_canvas(ui, ctx));

        self.render_pending_dialog(ctx);

        if ctx.input(|i| i.viewport().close_requested()) && !self.window.close_request() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }
    }
}

impl eframe::App for EasyPaintApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
