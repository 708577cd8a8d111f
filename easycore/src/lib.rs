//! easycore — shared library for Easy Paint
//!
//! Theme, settings storage and log setup. Nothing in here knows about
//! canvases or menus.

pub mod logging;
pub mod storage;
pub mod theme;

pub use theme::EasyTheme;
