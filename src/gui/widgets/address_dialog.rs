//! Modal dialog for editing the label attached to a row's address.
//!
//! The mode is resolved from the address book at open time: a known entry
//! opens as an edit typed per the entry (receiving vs sending), an unknown
//! address opens as a new sending entry pre-filled with the address.

use crate::addressbook::{AddressBook, AddressType};
use eframe::egui;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressDialogMode {
    EditReceiving,
    EditSending,
    NewSending,
}

impl AddressDialogMode {
    pub fn title(&self) -> &'static str {
        match self {
            AddressDialogMode::EditReceiving => "Edit receiving address",
            AddressDialogMode::EditSending => "Edit sending address",
            AddressDialogMode::NewSending => "New sending address",
        }
    }
}

/// The label applied when the dialog is confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressEdit {
    pub address: String,
    pub label: String,
}

pub struct AddressDialog {
    mode: AddressDialogMode,
    address: String,
    label_input: String,
    open: bool,
}

impl AddressDialog {
    /// Resolve the dialog mode for an address against the address book.
    pub fn for_address(book: &AddressBook, address: &str) -> Self {
        let (mode, label) = match book.lookup(address) {
            Some(entry) => {
                let mode = match entry.entry_type {
                    AddressType::Receiving => AddressDialogMode::EditReceiving,
                    AddressType::Sending => AddressDialogMode::EditSending,
                };
                (mode, entry.label.clone())
            }
            None => (AddressDialogMode::NewSending, String::new()),
        };
        Self {
            mode,
            address: address.to_string(),
            label_input: label,
            open: true,
        }
    }

    pub fn mode(&self) -> AddressDialogMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Render the modal. Returns the edit when the user confirms; dismissing
    /// the window applies nothing.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<AddressEdit> {
        let mut result = None;
        let mut is_open = self.open;
        egui::Window::new(self.mode.title())
            .open(&mut is_open)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                egui::Grid::new("address_dialog_grid")
                    .num_columns(2)
                    .spacing([16.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Address:");
                        ui.monospace(&self.address);
                        ui.end_row();

                        ui.label("Label:");
                        ui.text_edit_singleline(&mut self.label_input);
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        result = Some(AddressEdit {
                            address: self.address.clone(),
                            label: self.label_input.trim().to_string(),
                        });
                        self.open = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });
            });
        if !is_open {
            self.open = false;
        }
        result
    }
}
