//! Named actions and the menus that show them.
//!
//! Every command the window understands is an [`Action`] registered once in
//! the [`ActionTable`]. Menus only reference actions by id, and shortcut
//! handling walks the table directly, so a hidden menu bar does not disable
//! any key binding.

use crate::formats::ImageFormatTag;
use egui::{Key, KeyboardShortcut, Modifiers};

/// Cmd/Ctrl+O
pub const OPEN_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
/// Cmd/Ctrl+Q
pub const EXIT_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);
pub const PEN_COLOR_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::C);
pub const PEN_WIDTH_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::W);
pub const CLEAR_SCREEN_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::L);
/// Ctrl+Alt+T
pub const TOGGLE_MENU_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        alt: true,
        ..Modifiers::COMMAND
    },
    Key::T,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionId {
    Open,
    /// Save in the format attached to the action; the index is the
    /// action's position in the Save As menu.
    SaveAs(usize),
    Exit,
    PenColor,
    PenWidth,
    ClearScreen,
    ToggleMenu,
    About,
    AboutFramework,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub id: ActionId,
    pub text: String,
    pub shortcut: Option<KeyboardShortcut>,
    /// Attached format tag; only save actions carry one.
    pub data: Option<ImageFormatTag>,
}

impl Action {
    fn new(id: ActionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            shortcut: None,
            data: None,
        }
    }

    fn with_shortcut(mut self, shortcut: KeyboardShortcut) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    fn with_data(mut self, format: ImageFormatTag) -> Self {
        self.data = Some(format);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuId {
    File,
    SaveAs,
    Options,
    Help,
}

impl MenuId {
    pub fn title(&self) -> &'static str {
        match self {
            MenuId::File => "File",
            MenuId::SaveAs => "Save As",
            MenuId::Options => "Options",
            MenuId::Help => "Help",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Action(ActionId),
    Submenu(MenuId),
    Separator,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub id: MenuId,
    pub items: Vec<MenuItem>,
}

/// Menus shown on the menu bar, left to right.
const MENU_BAR: [MenuId; 3] = [MenuId::File, MenuId::Options, MenuId::Help];

/// All actions and menus of the main window. Built once, never changed.
#[derive(Clone, Debug)]
pub struct ActionTable {
    actions: Vec<Action>,
    menus: Vec<Menu>,
}

impl ActionTable {
    pub fn new(formats: &[ImageFormatTag]) -> Self {
        let save_as: Vec<Action> = formats
            .iter()
            .enumerate()
            .map(|(i, format)| {
                Action::new(ActionId::SaveAs(i), format!("{}...", format.label())).with_data(format.clone())
            })
            .collect();

        let mut actions = vec![Action::new(ActionId::Open, "Open...").with_shortcut(OPEN_SHORTCUT)];
        actions.extend(save_as.iter().cloned());
        actions.extend([
            Action::new(ActionId::Exit, "Exit").with_shortcut(EXIT_SHORTCUT),
            Action::new(ActionId::PenColor, "Pen Color...").with_shortcut(PEN_COLOR_SHORTCUT),
            Action::new(ActionId::PenWidth, "Pen Width...").with_shortcut(PEN_WIDTH_SHORTCUT),
            Action::new(ActionId::ClearScreen, "Clear Screen").with_shortcut(CLEAR_SCREEN_SHORTCUT),
            Action::new(ActionId::ToggleMenu, "Toggle Menu").with_shortcut(TOGGLE_MENU_SHORTCUT),
            Action::new(ActionId::About, "About"),
            Action::new(ActionId::AboutFramework, "About egui"),
        ]);

        let menus = vec![
            Menu {
                id: MenuId::SaveAs,
                items: save_as.iter().map(|a| MenuItem::Action(a.id)).collect(),
            },
            Menu {
                id: MenuId::File,
                items: vec![
                    MenuItem::Action(ActionId::Open),
                    MenuItem::Submenu(MenuId::SaveAs),
                    MenuItem::Separator,
                    MenuItem::Action(ActionId::Exit),
                ],
            },
            Menu {
                id: MenuId::Options,
                items: vec![
                    MenuItem::Action(ActionId::PenColor),
                    MenuItem::Action(ActionId::PenWidth),
                    MenuItem::Separator,
                    MenuItem::Action(ActionId::ClearScreen),
                    MenuItem::Action(ActionId::ToggleMenu),
                ],
            },
            Menu {
                id: MenuId::Help,
                items: vec![
                    MenuItem::Action(ActionId::About),
                    MenuItem::Action(ActionId::AboutFramework),
                ],
            },
        ];

        Self { actions, menus }
    }

    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.iter().find(|m| m.id == id)
    }

    /// Top-level menus in menu bar order.
    pub fn menu_bar(&self) -> impl Iterator<Item = &Menu> {
        MENU_BAR.iter().filter_map(|id| self.menu(*id))
    }

    /// The format attached to an action, if it is a save action.
    pub fn format_of(&self, id: ActionId) -> Option<&ImageFormatTag> {
        self.get(id).and_then(|a| a.data.as_ref())
    }

    /// Actions bound to a key combination.
    pub fn shortcuts(&self) -> impl Iterator<Item = (KeyboardShortcut, ActionId)> + '_ {
        self.actions.iter().filter_map(|a| a.shortcut.map(|s| (s, a.id)))
    }

    /// The action bound to `shortcut`, if any.
    pub fn action_for_shortcut(&self, shortcut: &KeyboardShortcut) -> Option<ActionId> {
        self.shortcuts().find(|(s, _)| s == shortcut).map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn formats() -> Vec<ImageFormatTag> {
        ["bmp", "jpg", "png"].into_iter().map(ImageFormatTag::new).collect()
    }

    #[test]
    fn test_one_save_action_per_format() {
        let table = ActionTable::new(&formats());
        let tags: Vec<_> = table.actions().iter().filter_map(|a| a.data.clone()).collect();
        assert_eq!(tags, formats());
        assert_eq!(table.format_of(ActionId::SaveAs(1)), Some(&ImageFormatTag::new("jpg")));
        assert_eq!(table.get(ActionId::SaveAs(2)).map(|a| a.text.as_str()), Some("PNG..."));
        assert_eq!(table.format_of(ActionId::Open), None);
    }

    #[test]
    fn test_action_ids_unique() {
        let table = ActionTable::new(&formats());
        let ids: HashSet<_> = table.actions().iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), table.actions().len());
    }

    #[test]
    fn test_menu_layout() {
        let table = ActionTable::new(&formats());
        let bar: Vec<_> = table.menu_bar().map(|m| m.id.title()).collect();
        assert_eq!(bar, ["File", "Options", "Help"]);

        let file = table.menu(MenuId::File).unwrap();
        assert_eq!(file.items[1], MenuItem::Submenu(MenuId::SaveAs));
        assert_eq!(file.items.last(), Some(&MenuItem::Action(ActionId::Exit)));

        let save_as = table.menu(MenuId::SaveAs).unwrap();
        assert_eq!(save_as.items.len(), 3);
    }

    #[test]
    fn test_shortcuts() {
        let table = ActionTable::new(&formats());
        assert_eq!(table.action_for_shortcut(&TOGGLE_MENU_SHORTCUT), Some(ActionId::ToggleMenu));
        assert_eq!(table.action_for_shortcut(&PEN_COLOR_SHORTCUT), Some(ActionId::PenColor));
        assert_eq!(table.action_for_shortcut(&PEN_WIDTH_SHORTCUT), Some(ActionId::PenWidth));
        assert_eq!(table.action_for_shortcut(&OPEN_SHORTCUT), Some(ActionId::Open));
        assert_eq!(table.action_for_shortcut(&EXIT_SHORTCUT), Some(ActionId::Exit));

        let plain_t = KeyboardShortcut::new(Modifiers::COMMAND, Key::T);
        assert_eq!(table.action_for_shortcut(&plain_t), None);
        assert!(table.get(ActionId::About).unwrap().shortcut.is_none());
    }
}
