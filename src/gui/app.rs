//! The demo wallet shell hosting the candy history view.
//!
//! Owns the wallet model, the persisted view preferences, and the
//! notification plumbing; the history widget reports back through its
//! registered callbacks.

use crate::addressbook::{AddressBook, AddressBookEntry, AddressType};
use crate::gui::notifications::{
    push_notification, NotificationEntry, Severity, StatusMessage,
};
use crate::gui::theme::{configure_style, AppTheme};
use crate::gui::widgets::{CandyHistoryView, SelectionSum};
use crate::model::{CandyRecord, CandyStatus, CandyTableModel, TxHash};
use crate::settings::ViewPreferences;
use crate::wallet::{DisplayOptions, WalletModel};
use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, Local};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Outputs the history view pushes through its callbacks, drained by the
/// shell once per frame.
#[derive(Default)]
struct ViewOutputs {
    selection_sum: Option<SelectionSum>,
    messages: Vec<StatusMessage>,
    activated_rows: Vec<usize>,
}

pub struct GuiApp {
    theme: AppTheme,
    wallet: WalletModel,
    prefs: ViewPreferences,
    history_view: CandyHistoryView,
    outputs: Rc<RefCell<ViewOutputs>>,

    selection_sum: Option<SelectionSum>,
    available_units: Vec<String>,

    notifications: VecDeque<NotificationEntry>,
    show_notifications_popup: bool,
    notification_toast_visible: bool,
    notification_toast_close_time: Option<std::time::Instant>,
    last_notification_count: usize,
}

impl GuiApp {
    pub fn new(prefs: ViewPreferences, ctx: &egui::Context) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        let wallet = demo_wallet();
        let mut available_units: Vec<String> = wallet
            .candy_model()
            .records()
            .iter()
            .map(|r| r.unit.clone())
            .collect();
        available_units.sort();
        available_units.dedup();

        let mut history_view = CandyHistoryView::new(&prefs);
        history_view.set_model();
        history_view.update_watch_only_column(wallet.have_watch_only());

        let outputs: Rc<RefCell<ViewOutputs>> = Rc::default();
        {
            let sink = outputs.clone();
            history_view.on_selection_sum(move |sum| {
                sink.borrow_mut().selection_sum = Some(sum.clone());
            });
        }
        {
            let sink = outputs.clone();
            history_view.on_message(move |message| {
                sink.borrow_mut().messages.push(message.clone());
            });
        }
        {
            let sink = outputs.clone();
            history_view.on_row_activated(move |source_index| {
                sink.borrow_mut().activated_rows.push(source_index);
            });
        }

        Self {
            theme,
            wallet,
            prefs,
            history_view,
            outputs,
            selection_sum: None,
            available_units,
            notifications: VecDeque::with_capacity(20),
            show_notifications_popup: false,
            notification_toast_visible: false,
            notification_toast_close_time: None,
            last_notification_count: 0,
        }
    }

    fn drain_view_outputs(&mut self) {
        let mut outputs = self.outputs.borrow_mut();
        if let Some(sum) = outputs.selection_sum.take() {
            self.selection_sum = Some(sum);
        }
        for message in outputs.messages.drain(..) {
            push_notification(
                &mut self.notifications,
                NotificationEntry::from_status(&message),
            );
        }
        for source_index in outputs.activated_rows.drain(..) {
            if let Some(record) = self.wallet.candy_model().record(source_index) {
                push_notification(
                    &mut self.notifications,
                    NotificationEntry::new(
                        format!("Opened transaction {}", record.tx_id()),
                        Severity::Info,
                    ),
                );
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Candy history").color(self.theme.primary));
                ui.label(
                    RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(12.0)
                        .color(self.theme.text_secondary),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // Display unit used in export column titles
                    let current_unit = self.wallet.options().display_unit.clone();
                    egui::ComboBox::from_id_source("display_unit")
                        .selected_text(&current_unit)
                        .width(90.0)
                        .show_ui(ui, |ui| {
                            for unit in &self.available_units {
                                if ui
                                    .selectable_label(*unit == current_unit, unit)
                                    .clicked()
                                {
                                    self.wallet.options_mut().display_unit = unit.clone();
                                }
                            }
                        });
                    ui.label(RichText::new("Unit:").color(self.theme.text_secondary));
                });
            });
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Selected amount:").color(self.theme.text_secondary));
                match &self.selection_sum {
                    Some(sum) => {
                        ui.label(
                            RichText::new(&sum.text)
                                .color(self.theme.amount_color(sum.is_negative)),
                        );
                    }
                    None => {
                        ui.label(RichText::new("-").color(self.theme.text_secondary));
                    }
                }
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // The table column tracks watch-only presence; the filter combo
            // stays visible regardless.
            self.history_view
                .update_watch_only_column(self.wallet.have_watch_only());
            let theme = self.theme;
            self.history_view
                .show(ui, &theme, &mut self.wallet, &mut self.prefs);
        });

        if self.history_view.take_prefs_dirty() {
            if let Err(e) = self.prefs.save() {
                tracing::warn!("Failed to save view preferences: {}", e);
            }
        }

        self.drain_view_outputs();

        // Check for new notifications and trigger toast
        let current_notification_count = self.notifications.len();
        if current_notification_count > self.last_notification_count {
            self.notification_toast_visible = true;
            self.notification_toast_close_time =
                Some(std::time::Instant::now() + std::time::Duration::from_secs(5));
        }
        self.last_notification_count = current_notification_count;

        // Auto-close toast after timeout
        if let Some(close_time) = self.notification_toast_close_time {
            if std::time::Instant::now() >= close_time {
                self.notification_toast_visible = false;
                self.notification_toast_close_time = None;
            }
        }

        let notification_count = self.notifications.len();
        let latest = self.notifications.back().cloned();

        egui::Area::new(egui::Id::new("notification_overlay"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -32.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(self.theme.surface)
                    .rounding(6.0)
                    .stroke(egui::Stroke::new(1.0, self.theme.primary))
                    .inner_margin(egui::Margin::symmetric(8.0, 6.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            if ui
                                .add(
                                    egui::Button::new(
                                        RichText::new("[!]")
                                            .size(14.0)
                                            .color(self.theme.primary)
                                            .strong(),
                                    )
                                    .fill(egui::Color32::TRANSPARENT)
                                    .stroke(egui::Stroke::NONE),
                                )
                                .on_hover_text("Click to view notification history")
                                .clicked()
                            {
                                self.show_notifications_popup = !self.show_notifications_popup;
                            }

                            if self.notification_toast_visible {
                                if let Some(entry) = &latest {
                                    let color = match entry.severity {
                                        Severity::Info => self.theme.text_primary,
                                        Severity::Warning => self.theme.warning,
                                        Severity::Error => self.theme.error,
                                    };
                                    ui.label(
                                        RichText::new(entry.toast_text(60))
                                            .size(12.0)
                                            .color(color),
                                    );
                                }
                            } else if notification_count > 0 {
                                ui.label(
                                    RichText::new(format!("{}", notification_count))
                                        .size(10.0)
                                        .color(self.theme.warning),
                                );
                            }
                        });
                    });
            });

        if self.show_notifications_popup {
            egui::Window::new("Notification history")
                .collapsible(false)
                .resizable(true)
                .default_width(420.0)
                .default_height(300.0)
                .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -70.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{} notifications", self.notifications.len()))
                                .color(self.theme.text_secondary),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Close").clicked() {
                                self.show_notifications_popup = false;
                            }
                            if ui.button("Clear").clicked() {
                                self.notifications.clear();
                            }
                        });
                    });
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .max_height(240.0)
                        .show(ui, |ui| {
                            if self.notifications.is_empty() {
                                ui.label(
                                    RichText::new("No notifications yet.")
                                        .color(self.theme.text_secondary),
                                );
                            }
                            for entry in self.notifications.iter().rev() {
                                let color = match entry.severity {
                                    Severity::Info => self.theme.text_primary,
                                    Severity::Warning => self.theme.warning,
                                    Severity::Error => self.theme.error,
                                };
                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(format!("[{}]", entry.time_ago()))
                                            .size(11.0)
                                            .color(self.theme.text_secondary),
                                    );
                                    ui.label(
                                        RichText::new(&entry.message).size(12.0).color(color),
                                    );
                                });
                                ui.add_space(3.0);
                            }
                        });
                });
        }
    }
}

/// Deterministic sample candy data relative to "now", so every date preset
/// has matching rows.
fn demo_wallet() -> WalletModel {
    let now = Local::now();
    let today = now.date_naive();
    let first_of_month = today.with_day(1).unwrap_or(today);
    let last_month = first_of_month.pred_opt().unwrap_or(today);

    let record = |txid_byte: u8,
                  time: chrono::DateTime<Local>,
                  status: CandyStatus,
                  watch_only: bool,
                  asset: &str,
                  address: &str,
                  label: &str,
                  amount: i64,
                  decimals: u8| CandyRecord {
        txid: TxHash::new([txid_byte; 32]),
        output_index: 0,
        time,
        status,
        watch_only,
        asset_name: asset.to_string(),
        address: address.to_string(),
        label: label.to_string(),
        amount,
        decimals,
        unit: asset.to_string(),
        raw_hex: format!("0100{:02x}ff", txid_byte),
    };

    let records = vec![
        record(
            0x01,
            now - Duration::hours(1),
            CandyStatus::Unconfirmed,
            false,
            "CANDY",
            "XcandyFaucet1111111111111111111111",
            "Faucet drop",
            250_000,
            2,
        ),
        record(
            0x02,
            now - Duration::hours(5),
            CandyStatus::Confirming(3),
            false,
            "SUGAR",
            "XsugarPool2222222222222222222222222",
            "",
            1_250_000_000,
            8,
        ),
        record(
            0x03,
            now - Duration::days(1),
            CandyStatus::Confirmed,
            true,
            "CANDY",
            "XwatchOnly333333333333333333333333",
            "Cold wallet",
            90_000,
            2,
        ),
        record(
            0x04,
            now - Duration::days(3),
            CandyStatus::Confirmed,
            false,
            "TAFFY",
            "XtaffyDrop4444444444444444444444444",
            "",
            42,
            0,
        ),
        record(
            0x05,
            now - Duration::days(9),
            CandyStatus::Conflicted,
            false,
            "CANDY",
            "XcandyFaucet1111111111111111111111",
            "Faucet drop",
            -12_500,
            2,
        ),
        record(
            0x06,
            last_month
                .with_day(3)
                .unwrap_or(last_month)
                .and_hms_opt(12, 0, 0)
                .and_then(|t| t.and_local_timezone(Local).single())
                .unwrap_or(now),
            CandyStatus::Confirmed,
            false,
            "SUGAR",
            "XsugarPool2222222222222222222222222",
            "",
            800_000_000,
            8,
        ),
        record(
            0x07,
            now - Duration::days(200),
            CandyStatus::Confirmed,
            false,
            "CANDY",
            "XoldDrop55555555555555555555555555",
            "",
            5_000_000,
            2,
        ),
    ];

    let address_book = AddressBook::new(vec![
        AddressBookEntry {
            address: "XcandyFaucet1111111111111111111111".to_string(),
            label: "Faucet drop".to_string(),
            entry_type: AddressType::Receiving,
        },
        AddressBookEntry {
            address: "XwatchOnly333333333333333333333333".to_string(),
            label: "Cold wallet".to_string(),
            entry_type: AddressType::Receiving,
        },
    ]);

    let options = DisplayOptions {
        display_unit: "CANDY".to_string(),
        third_party_tx_urls: "https://explorer.example.com/tx/%s".to_string(),
    };

    WalletModel::new(CandyTableModel::new(records), address_book, options)
}

pub fn launch(prefs: ViewPreferences) -> Result<()> {
    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(GuiApp::new(prefs.clone(), &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default().with_inner_size([1000.0, 640.0]);
    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Candyview - Candy Transaction History",
        native_options,
        Box::new(app_creator),
    )
    .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
