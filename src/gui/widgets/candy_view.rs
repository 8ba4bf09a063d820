//! The candy history view: a filterable, sortable table of candy (airdrop)
//! transactions with per-row actions.
//!
//! The widget owns the filter binding and the transient UI state (inputs,
//! selection, open dialogs); the candy model, address book, and display
//! options stay with the `WalletModel` the host passes into `show`. Outputs
//! flow through registered callbacks: the formatted selection sum, activated
//! (double-clicked) rows, and export status messages.

use crate::amounts::{self, SeparatorStyle};
use crate::explorer;
use crate::export;
use crate::filter::{self, CandyFilter, DateFilterPreset, SortColumn, WatchOnlyFilter};
use crate::gui::notifications::StatusMessage;
use crate::gui::theme::AppTheme;
use crate::gui::widgets::address_dialog::AddressDialog;
use crate::model::{CandyStatus, CandyTableModel, TxHash};
use crate::settings::ViewPreferences;
use crate::wallet::WalletModel;
use chrono::{Local, NaiveDate};
use eframe::egui::{self, RichText};
use egui_extras::{Column, DatePickerButton, TableBuilder};
use std::collections::HashSet;

/// The formatted sum of the current selection, emitted on selection change.
///
/// The host renders `text` in red when `is_negative` is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSum {
    pub text: String,
    pub is_negative: bool,
}

/// Sum the selected rows, grouped by the asset of the first selected row.
///
/// `selected_view_order` holds source-model indices in display order. Rows of
/// other assets do not contribute; the first row's precision and unit drive
/// the formatting. Empty selections produce nothing.
pub fn selection_sum(
    model: &CandyTableModel,
    selected_view_order: &[usize],
) -> Option<SelectionSum> {
    let first = model.record(*selected_view_order.first()?)?;
    let mut total: i64 = 0;
    for &index in selected_view_order {
        if let Some(record) = model.record(index) {
            if record.asset_name == first.asset_name {
                total = total.saturating_add(record.amount);
            }
        }
    }
    Some(SelectionSum {
        text: amounts::format_with_unit(
            total,
            first.decimals,
            &first.unit,
            true,
            SeparatorStyle::Always,
        ),
        is_negative: total < 0,
    })
}

/// The row the Ctrl+C override copies: the first selected row in display
/// order, unless another widget (a filter input) holds keyboard focus.
fn copy_override_target(selection_view_order: &[usize], focus_elsewhere: bool) -> Option<usize> {
    if focus_elsewhere {
        None
    } else {
        selection_view_order.first().copied()
    }
}

/// Row actions that mutate state, applied after the table pass.
enum RowAction {
    Abandon(TxHash),
    EditLabel(String),
    ShowDetails(usize),
}

type SelectionSumCallback = Box<dyn FnMut(&SelectionSum)>;
type RowActivatedCallback = Box<dyn FnMut(usize)>;
type MessageCallback = Box<dyn FnMut(&StatusMessage)>;

pub struct CandyHistoryView {
    /// Active filter binding; `None` means no model is bound and every
    /// parameter setter is a no-op.
    filter: Option<CandyFilter>,

    date_preset: DateFilterPreset,
    range_from: NaiveDate,
    range_to: NaiveDate,
    show_range_panel: bool,
    watch_only_choice: WatchOnlyFilter,
    asset_input: String,
    address_input: String,
    amount_input: String,

    show_watch_only_column: bool,

    /// Selected rows as source-model indices.
    selected: HashSet<usize>,
    /// Selection (view order) behind the last sum emission.
    last_emitted: Vec<usize>,

    details_row: Option<usize>,
    address_dialog: Option<AddressDialog>,
    scroll_to_view_row: Option<usize>,
    pending_focus: Option<(TxHash, u32)>,

    prefs_dirty: bool,

    selection_sum_callbacks: Vec<SelectionSumCallback>,
    row_activated_callbacks: Vec<RowActivatedCallback>,
    message_callbacks: Vec<MessageCallback>,
}

impl CandyHistoryView {
    /// Create the view with its inputs restored from persisted preferences.
    /// No filter is bound until `set_model`.
    pub fn new(prefs: &ViewPreferences) -> Self {
        let date_preset =
            DateFilterPreset::from_index(prefs.date_preset_index).unwrap_or(DateFilterPreset::All);
        Self {
            filter: None,
            date_preset,
            range_from: prefs.range_from(),
            range_to: prefs.range_to(),
            show_range_panel: date_preset == DateFilterPreset::Range,
            watch_only_choice: WatchOnlyFilter::All,
            asset_input: String::new(),
            address_input: String::new(),
            amount_input: String::new(),
            show_watch_only_column: false,
            selected: HashSet::new(),
            last_emitted: Vec::new(),
            details_row: None,
            address_dialog: None,
            scroll_to_view_row: None,
            pending_focus: None,
            prefs_dirty: false,
            selection_sum_callbacks: Vec::new(),
            row_activated_callbacks: Vec::new(),
            message_callbacks: Vec::new(),
        }
    }

    /// Bind a fresh filter and push every current input into it.
    pub fn set_model(&mut self) {
        let mut candy_filter = CandyFilter::new();
        candy_filter.set_watch_only(self.watch_only_choice);
        candy_filter.set_asset_needle(self.asset_input.clone());
        candy_filter.set_address_needle(self.address_input.clone());
        candy_filter.set_min_amount_str(filter::normalize_amount_input(&self.amount_input));
        self.filter = Some(candy_filter);
        self.apply_date_filter();
    }

    /// Drop the filter binding; the view renders empty and setters no-op.
    pub fn clear_model(&mut self) {
        self.filter = None;
        self.selected.clear();
        self.last_emitted.clear();
        self.details_row = None;
        self.address_dialog = None;
    }

    // ---- callback registration ----

    pub fn on_selection_sum(&mut self, callback: impl FnMut(&SelectionSum) + 'static) {
        self.selection_sum_callbacks.push(Box::new(callback));
    }

    pub fn on_row_activated(&mut self, callback: impl FnMut(usize) + 'static) {
        self.row_activated_callbacks.push(Box::new(callback));
    }

    pub fn on_message(&mut self, callback: impl FnMut(&StatusMessage) + 'static) {
        self.message_callbacks.push(Box::new(callback));
    }

    fn emit_selection_sum(&mut self, sum: &SelectionSum) {
        for callback in &mut self.selection_sum_callbacks {
            callback(sum);
        }
    }

    fn emit_row_activated(&mut self, source_index: usize) {
        for callback in &mut self.row_activated_callbacks {
            callback(source_index);
        }
    }

    fn emit_message(&mut self, message: &StatusMessage) {
        for callback in &mut self.message_callbacks {
            callback(message);
        }
    }

    // ---- host-driven state ----

    /// Show or hide the watch-only table column. The watch-only filter combo
    /// stays visible either way.
    pub fn update_watch_only_column(&mut self, have_watch_only: bool) {
        self.show_watch_only_column = have_watch_only;
    }

    pub fn watch_only_column_visible(&self) -> bool {
        self.show_watch_only_column
    }

    /// Select a specific candy output, scrolling it into view on the next
    /// frame. Does nothing if the row is filtered out or no model is bound.
    pub fn focus_transaction(&mut self, txid: TxHash, output_index: u32) {
        self.pending_focus = Some((txid, output_index));
    }

    /// Whether preferences changed since the last call; the host saves when
    /// this reports true.
    pub fn take_prefs_dirty(&mut self) -> bool {
        let dirty = self.prefs_dirty;
        self.prefs_dirty = false;
        dirty
    }

    // ---- filter parameter plumbing ----

    fn apply_date_filter(&mut self) {
        let (from, to) = match self.date_preset {
            DateFilterPreset::Range => filter::range_bounds(self.range_from, self.range_to),
            preset => filter::preset_bounds(preset, Local::now().date_naive()),
        };
        if let Some(candy_filter) = &mut self.filter {
            candy_filter.set_date_bounds(from, to);
        }
    }

    fn choose_date_preset(&mut self, preset: DateFilterPreset, prefs: &mut ViewPreferences) {
        self.date_preset = preset;
        self.show_range_panel = preset == DateFilterPreset::Range;
        prefs.date_preset_index = preset.index();
        self.apply_date_filter();
        self.prefs_dirty = true;
    }

    fn apply_range(&mut self, prefs: &mut ViewPreferences) {
        prefs.set_range(self.range_from, self.range_to);
        self.apply_date_filter();
        self.prefs_dirty = true;
    }

    fn apply_amount_filter(&mut self) {
        if let Some(candy_filter) = &mut self.filter {
            candy_filter
                .set_min_amount_str(filter::normalize_amount_input(&self.amount_input));
        }
    }

    fn resolve_focus(&mut self, model: &CandyTableModel) {
        if let Some((txid, output_index)) = self.pending_focus.take() {
            if let Some(candy_filter) = &self.filter {
                if let Some(source) = model.position_of(&txid, output_index) {
                    if let Some(view_pos) = candy_filter.view_position_of(model, source) {
                        self.selected.clear();
                        self.selected.insert(source);
                        self.scroll_to_view_row = Some(view_pos);
                    }
                }
            }
        }
    }

    // ---- rendering ----

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        theme: &AppTheme,
        wallet: &mut WalletModel,
        prefs: &mut ViewPreferences,
    ) {
        let export_clicked = self.filter_controls(ui, prefs);

        self.resolve_focus(wallet.candy_model());

        let view_rows: Vec<usize> = match &self.filter {
            Some(candy_filter) => candy_filter.view_rows(wallet.candy_model()),
            None => Vec::new(),
        };
        let visible: HashSet<usize> = view_rows.iter().copied().collect();
        self.selected.retain(|index| visible.contains(index));

        let selection_view_order: Vec<usize> = view_rows
            .iter()
            .copied()
            .filter(|index| self.selected.contains(index))
            .collect();

        // Ctrl+C copies the full plain-text details of the first selected
        // row instead of the table's display text. Other keys pass through,
        // and a focused filter input keeps its own copy behavior.
        let focus_elsewhere = ui.memory(|m| m.focused().is_some());
        if let Some(first) = copy_override_target(&selection_view_order, focus_elsewhere) {
            let copy_requested = ui
                .input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::C));
            if copy_requested {
                if let Some(record) = wallet.candy_model().record(first) {
                    let text = record.plain_text();
                    ui.output_mut(|o| o.copied_text = text);
                }
            }
        }

        let mut pending_action: Option<RowAction> = None;
        let mut activated_row: Option<usize> = None;
        let mut toggled_sort: Option<SortColumn> = None;

        {
            let wallet_ref: &WalletModel = wallet;
            let model = wallet_ref.candy_model();
            let explorer_links =
                explorer::parse_templates(&wallet_ref.options().third_party_tx_urls);
            let show_watch_only = self.show_watch_only_column;
            let selected = &mut self.selected;

            let mut table = TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .sense(egui::Sense::click())
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(110.0)); // Status
            if show_watch_only {
                table = table.column(Column::initial(40.0)); // Watch-only
            }
            table = table
                .column(Column::initial(120.0)) // Date
                .column(Column::initial(90.0)) // Asset
                .column(Column::remainder().clip(true)) // Address / label
                .column(Column::initial(120.0)); // Amount
            if let Some(view_pos) = self.scroll_to_view_row.take() {
                table = table.scroll_to_row(view_pos, Some(egui::Align::Center));
            }

            table
                .header(22.0, |mut header| {
                    header.col(|ui| {
                        if ui.button("Status").clicked() {
                            toggled_sort = Some(SortColumn::Status);
                        }
                    });
                    if show_watch_only {
                        header.col(|ui| {
                            if ui.button("W").on_hover_text("Watch-only").clicked() {
                                toggled_sort = Some(SortColumn::WatchOnly);
                            }
                        });
                    }
                    header.col(|ui| {
                        if ui.button("Date").clicked() {
                            toggled_sort = Some(SortColumn::Date);
                        }
                    });
                    header.col(|ui| {
                        if ui.button("Asset").clicked() {
                            toggled_sort = Some(SortColumn::AssetName);
                        }
                    });
                    header.col(|ui| {
                        if ui.button("Address").clicked() {
                            toggled_sort = Some(SortColumn::Address);
                        }
                    });
                    header.col(|ui| {
                        if ui.button("Amount").clicked() {
                            toggled_sort = Some(SortColumn::Amount);
                        }
                    });
                })
                .body(|body| {
                    body.rows(20.0, view_rows.len(), |mut row| {
                        let source_index = view_rows[row.index()];
                        let record = match model.record(source_index) {
                            Some(record) => record,
                            None => return,
                        };
                        row.set_selected(selected.contains(&source_index));

                        row.col(|ui| {
                            let color = match record.status {
                                CandyStatus::Confirmed | CandyStatus::Confirming(_) => {
                                    theme.text_primary
                                }
                                CandyStatus::Conflicted | CandyStatus::Abandoned => theme.error,
                                CandyStatus::Offline | CandyStatus::Unconfirmed => theme.warning,
                            };
                            ui.label(RichText::new(record.status.label()).color(color));
                        });
                        if show_watch_only {
                            row.col(|ui| {
                                if record.watch_only {
                                    ui.label("yes");
                                }
                            });
                        }
                        row.col(|ui| {
                            ui.label(record.formatted_date());
                        });
                        row.col(|ui| {
                            ui.label(&record.asset_name);
                        });
                        row.col(|ui| {
                            ui.label(record.display_address());
                        });
                        row.col(|ui| {
                            let negative = record.amount < 0;
                            ui.label(
                                RichText::new(amounts::format_amount(
                                    record.amount,
                                    record.decimals,
                                    true,
                                    SeparatorStyle::Always,
                                ))
                                .color(theme.amount_color(negative)),
                            );
                        });

                        let response = row.response();
                        if response.clicked() {
                            let toggle = response.ctx.input(|i| i.modifiers.command);
                            if toggle {
                                if !selected.remove(&source_index) {
                                    selected.insert(source_index);
                                }
                            } else {
                                selected.clear();
                                selected.insert(source_index);
                            }
                        }
                        if response.double_clicked() {
                            activated_row = Some(source_index);
                        }
                        if response.secondary_clicked() && !selected.contains(&source_index) {
                            selected.clear();
                            selected.insert(source_index);
                        }
                        response.context_menu(|ui| {
                            // Actions operate on the first selected row in
                            // display order; the right-clicked row was just
                            // added to the selection if it was outside it.
                            let first = view_rows
                                .iter()
                                .copied()
                                .find(|index| selected.contains(index))
                                .unwrap_or(source_index);
                            let target = match model.record(first) {
                                Some(record) => record,
                                None => return,
                            };

                            let mut copy =
                                |ui: &mut egui::Ui, label: &str, value: String| {
                                    if ui
                                        .add_enabled(
                                            !value.is_empty(),
                                            egui::Button::new(label),
                                        )
                                        .clicked()
                                    {
                                        ui.output_mut(|o| o.copied_text = value);
                                        ui.close_menu();
                                    }
                                };
                            copy(ui, "Copy address", target.address.clone());
                            copy(ui, "Copy label", target.label.clone());
                            copy(
                                ui,
                                "Copy amount",
                                amounts::format_with_unit(
                                    target.amount,
                                    target.decimals,
                                    &target.unit,
                                    true,
                                    SeparatorStyle::Always,
                                ),
                            );
                            copy(ui, "Copy asset name", target.asset_name.clone());
                            copy(ui, "Copy transaction ID", target.tx_id());
                            copy(ui, "Copy raw transaction", target.raw_hex.clone());
                            copy(ui, "Copy full transaction details", target.plain_text());

                            ui.separator();
                            let can_abandon =
                                wallet_ref.transaction_can_be_abandoned(&target.txid);
                            if ui
                                .add_enabled(
                                    can_abandon,
                                    egui::Button::new("Abandon transaction"),
                                )
                                .clicked()
                            {
                                pending_action = Some(RowAction::Abandon(target.txid));
                                ui.close_menu();
                            }
                            if ui
                                .add_enabled(
                                    !target.address.is_empty(),
                                    egui::Button::new("Edit label"),
                                )
                                .clicked()
                            {
                                pending_action =
                                    Some(RowAction::EditLabel(target.address.clone()));
                                ui.close_menu();
                            }
                            if ui.button("Show transaction details").clicked() {
                                pending_action = Some(RowAction::ShowDetails(first));
                                ui.close_menu();
                            }

                            if !explorer_links.is_empty() {
                                ui.separator();
                                for link in &explorer_links {
                                    if ui.button(format!("Show in {}", link.host)).clicked() {
                                        let url = link.url_for(&target.txid.to_hex());
                                        if let Err(e) = open::that(&url) {
                                            tracing::warn!(
                                                "Failed to open explorer URL {}: {}",
                                                url,
                                                e
                                            );
                                        }
                                        ui.close_menu();
                                    }
                                }
                            }
                        });
                    });
                });
        }

        if let Some(column) = toggled_sort {
            if let Some(candy_filter) = &mut self.filter {
                candy_filter.toggle_sort(column);
            }
        }

        if let Some(source_index) = activated_row {
            self.emit_row_activated(source_index);
        }

        match pending_action {
            Some(RowAction::Abandon(txid)) => {
                wallet.abandon_transaction(&txid);
            }
            Some(RowAction::EditLabel(address)) => {
                self.address_dialog =
                    Some(AddressDialog::for_address(wallet.address_book(), &address));
            }
            Some(RowAction::ShowDetails(source_index)) => {
                self.details_row = Some(source_index);
            }
            None => {}
        }

        // Re-derive the selection in view order after click handling and
        // emit the sum once per change. Empty selections emit nothing.
        let selection_view_order: Vec<usize> = view_rows
            .iter()
            .copied()
            .filter(|index| self.selected.contains(index))
            .collect();
        if selection_view_order != self.last_emitted {
            if let Some(sum) = selection_sum(wallet.candy_model(), &selection_view_order) {
                self.emit_selection_sum(&sum);
            }
            self.last_emitted = selection_view_order;
        }

        self.show_dialogs(ui.ctx(), wallet);

        if export_clicked {
            self.export_csv(wallet, &view_rows);
        }
    }

    /// The filter input row, plus the from/to sub-panel while the Range
    /// preset is active. Returns whether export was requested.
    fn filter_controls(&mut self, ui: &mut egui::Ui, prefs: &mut ViewPreferences) -> bool {
        let mut export_clicked = false;
        ui.horizontal(|ui| {
            let watch_only_combo = egui::ComboBox::from_id_source("candy_watch_only")
                .selected_text(self.watch_only_choice.label())
                .width(60.0)
                .show_ui(ui, |ui| {
                    for mode in WatchOnlyFilter::ALL {
                        if ui
                            .selectable_label(self.watch_only_choice == mode, mode.label())
                            .clicked()
                        {
                            self.watch_only_choice = mode;
                            if let Some(candy_filter) = &mut self.filter {
                                candy_filter.set_watch_only(mode);
                            }
                        }
                    }
                });
            watch_only_combo.response.on_hover_text("Watch-only");

            let mut chosen_preset = None;
            egui::ComboBox::from_id_source("candy_date_preset")
                .selected_text(self.date_preset.label())
                .width(110.0)
                .show_ui(ui, |ui| {
                    for preset in DateFilterPreset::ALL {
                        if ui
                            .selectable_label(self.date_preset == preset, preset.label())
                            .clicked()
                        {
                            chosen_preset = Some(preset);
                        }
                    }
                });
            if let Some(preset) = chosen_preset {
                self.choose_date_preset(preset, prefs);
            }

            let asset_response = ui.add(
                egui::TextEdit::singleline(&mut self.asset_input)
                    .hint_text("Asset name")
                    .desired_width(100.0),
            );
            if asset_response.changed() {
                if let Some(candy_filter) = &mut self.filter {
                    candy_filter.set_asset_needle(self.asset_input.clone());
                }
            }

            let address_response = ui.add(
                egui::TextEdit::singleline(&mut self.address_input)
                    .hint_text("Enter address or label to search")
                    .desired_width(200.0),
            );
            if address_response.changed() {
                if let Some(candy_filter) = &mut self.filter {
                    candy_filter.set_address_needle(self.address_input.clone());
                }
            }

            let amount_response = ui.add(
                egui::TextEdit::singleline(&mut self.amount_input)
                    .hint_text("Min amount")
                    .desired_width(80.0),
            );
            if amount_response.changed() {
                self.apply_amount_filter();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button("Export CSV")
                    .on_hover_text("Export the data in the current tab to a file")
                    .clicked()
                {
                    export_clicked = true;
                }
            });
        });

        if self.show_range_panel {
            ui.horizontal(|ui| {
                ui.label("Range:");
                let from_response = ui.add(
                    DatePickerButton::new(&mut self.range_from).id_source("candy_date_from"),
                );
                ui.label("to");
                let to_response =
                    ui.add(DatePickerButton::new(&mut self.range_to).id_source("candy_date_to"));
                if from_response.changed() || to_response.changed() {
                    self.apply_range(prefs);
                }
            });
        }

        export_clicked
    }

    fn show_dialogs(&mut self, ctx: &egui::Context, wallet: &mut WalletModel) {
        if let Some(dialog) = &mut self.address_dialog {
            if let Some(edit) = dialog.show(ctx) {
                wallet.set_address_label(&edit.address, &edit.label);
            }
            if !dialog.is_open() {
                self.address_dialog = None;
            }
        }

        if let Some(source_index) = self.details_row {
            let mut open = true;
            egui::Window::new("Transaction details")
                .open(&mut open)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .collapsible(false)
                .resizable(false)
                .default_width(420.0)
                .show(ctx, |ui| {
                    let text = match wallet.candy_model().record(source_index) {
                        Some(record) => record.plain_text(),
                        None => return,
                    };
                    for line in text.lines() {
                        ui.monospace(line);
                    }
                    ui.add_space(8.0);
                    if ui.button("Copy details").clicked() {
                        ui.output_mut(|o| o.copied_text = text.clone());
                    }
                });
            if !open {
                self.details_row = None;
            }
        }
    }

    fn export_csv(&mut self, wallet: &WalletModel, view_rows: &[usize]) {
        // User cancel is a silent no-op
        let path = match rfd::FileDialog::new()
            .add_filter("Comma separated file", &["csv"])
            .set_file_name("candy_history.csv")
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        let include_watch_only = wallet.have_watch_only();
        let message = match export::write_csv(
            &path,
            wallet.candy_model(),
            view_rows,
            include_watch_only,
            &wallet.options().display_unit,
        ) {
            Ok(()) => StatusMessage::info(
                "Exporting Successful",
                format!(
                    "The candy history was successfully saved to {}.",
                    path.display()
                ),
            ),
            Err(e) => {
                tracing::warn!("CSV export failed: {}", e);
                StatusMessage::error(
                    "Exporting Failed",
                    format!(
                        "There was an error trying to save the candy history to {}.",
                        path.display()
                    ),
                )
            }
        };
        self.emit_message(&message);
    }
}
