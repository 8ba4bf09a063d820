//! The wallet-model facade consumed by the history view.
//!
//! Owns the candy table model, the address book, and the display options, and
//! answers the small set of queries the view needs: watch-only presence, the
//! abandon predicate and operation, and label edits that have to stay in sync
//! between the book and the visible rows.

use crate::addressbook::{AddressBook, AddressType};
use crate::model::{CandyTableModel, TxHash};

/// Display options exposed to the view: the unit used in export column
/// titles and the third-party explorer template list.
#[derive(Clone, Debug)]
pub struct DisplayOptions {
    pub display_unit: String,
    /// Pipe-separated explorer URL templates, `%s` standing in for the
    /// transaction hash. See `explorer::parse_templates`.
    pub third_party_tx_urls: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            display_unit: "CANDY".to_string(),
            third_party_tx_urls: String::new(),
        }
    }
}

pub struct WalletModel {
    candy_model: CandyTableModel,
    address_book: AddressBook,
    options: DisplayOptions,
}

impl WalletModel {
    pub fn new(
        candy_model: CandyTableModel,
        address_book: AddressBook,
        options: DisplayOptions,
    ) -> Self {
        Self {
            candy_model,
            address_book,
            options,
        }
    }

    pub fn candy_model(&self) -> &CandyTableModel {
        &self.candy_model
    }

    pub fn candy_model_mut(&mut self) -> &mut CandyTableModel {
        &mut self.candy_model
    }

    pub fn address_book(&self) -> &AddressBook {
        &self.address_book
    }

    pub fn address_book_mut(&mut self) -> &mut AddressBook {
        &mut self.address_book
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut DisplayOptions {
        &mut self.options
    }

    /// Whether any candy output is watch-only. Drives the watch-only table
    /// column and the CSV column gating.
    pub fn have_watch_only(&self) -> bool {
        self.candy_model.has_watch_only()
    }

    /// Whether the transaction is still eligible for abandonment. Every
    /// output of the transaction must agree.
    pub fn transaction_can_be_abandoned(&self, txid: &TxHash) -> bool {
        let mut outputs = self
            .candy_model
            .records()
            .iter()
            .filter(|r| r.txid == *txid)
            .peekable();
        outputs.peek().is_some() && outputs.all(|r| r.status.can_be_abandoned())
    }

    /// Mark the transaction abandoned, updating the display state of its
    /// rows. Returns false when the transaction is unknown or no longer
    /// eligible.
    pub fn abandon_transaction(&mut self, txid: &TxHash) -> bool {
        if !self.transaction_can_be_abandoned(txid) {
            return false;
        }
        let updated = self.candy_model.set_abandoned(txid);
        tracing::info!("Abandoned transaction {} ({} rows)", txid, updated);
        updated > 0
    }

    /// Apply a label to an address, keeping the address book and the visible
    /// rows in sync. Unknown addresses become new sending entries.
    pub fn set_address_label(&mut self, address: &str, label: &str) {
        if !self.address_book.set_label(address, label) {
            self.address_book.add_sending(address, label);
        }
        for record in self.candy_model.records_mut() {
            if record.address == address {
                record.label = label.to_string();
            }
        }
    }
}
