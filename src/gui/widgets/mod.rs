//! Reusable UI widgets.
//!
//! - `CandyHistoryView` - the filterable candy transaction table
//! - `AddressDialog` - modal label editor for a row's address

pub mod address_dialog;
mod candy_view;

pub use address_dialog::{AddressDialog, AddressDialogMode, AddressEdit};
pub use candy_view::{selection_sum, CandyHistoryView, SelectionSum};
