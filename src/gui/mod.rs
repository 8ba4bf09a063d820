//! GUI layer for candyview, built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - the demo wallet shell hosting the history view
//! - `theme` - centralized theme and styling (AppTheme)
//! - `notifications` - status messages, toast, and notification history
//! - `widgets` - the history view widget and the address label dialog
//!
//! ## Usage
//!
//! ```no_run
//! use candyview::settings::ViewPreferences;
//! use candyview::gui;
//!
//! let prefs = ViewPreferences::load();
//! gui::launch(prefs).expect("Failed to launch GUI");
//! ```

mod app;
pub mod notifications;
pub mod theme;
pub mod widgets;

pub use app::{launch, GuiApp};
pub use notifications::{NotificationEntry, Severity, StatusMessage};
pub use theme::{configure_style, AppTheme};
pub use widgets::{CandyHistoryView, SelectionSum};
