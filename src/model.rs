//! Candy transaction records and the in-memory table model backing the
//! history view.

use crate::amounts::{self, SeparatorStyle};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use std::fmt;

/// Confirmation depth at which a candy transaction is considered settled.
pub const RECOMMENDED_CONFIRMATIONS: u32 = 6;

const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A 32-byte transaction hash, displayed as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(text: &str) -> Result<Self> {
        let decoded = hex::decode(text.trim())?;
        let bytes: [u8; 32] = decoded
            .try_into()
            .map_err(|_| anyhow!("transaction hash must be exactly 32 bytes"))?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.to_hex())
    }
}

/// Confirmation state of a candy transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandyStatus {
    /// Not seen by any peer yet.
    Offline,
    /// In the mempool, zero confirmations.
    Unconfirmed,
    /// Confirmed, but below the recommended depth.
    Confirming(u32),
    Confirmed,
    Conflicted,
    Abandoned,
}

impl CandyStatus {
    pub fn label(&self) -> String {
        match self {
            CandyStatus::Offline => "Offline".to_string(),
            CandyStatus::Unconfirmed => "Unconfirmed".to_string(),
            CandyStatus::Confirming(depth) => {
                format!("Confirming ({} of {})", depth, RECOMMENDED_CONFIRMATIONS)
            }
            CandyStatus::Confirmed => "Confirmed".to_string(),
            CandyStatus::Conflicted => "Conflicted".to_string(),
            CandyStatus::Abandoned => "Abandoned".to_string(),
        }
    }

    /// Whether the transaction counts as confirmed for exports.
    pub fn counts_as_confirmed(&self) -> bool {
        matches!(self, CandyStatus::Confirming(_) | CandyStatus::Confirmed)
    }

    /// Whether the wallet may still abandon the transaction.
    pub fn can_be_abandoned(&self) -> bool {
        matches!(self, CandyStatus::Offline | CandyStatus::Unconfirmed)
    }

    /// Ordering key for the status column.
    pub fn sort_key(&self) -> u8 {
        match self {
            CandyStatus::Offline => 0,
            CandyStatus::Unconfirmed => 1,
            CandyStatus::Confirming(_) => 2,
            CandyStatus::Confirmed => 3,
            CandyStatus::Conflicted => 4,
            CandyStatus::Abandoned => 5,
        }
    }
}

/// One received candy distribution output.
#[derive(Clone, Debug)]
pub struct CandyRecord {
    pub txid: TxHash,
    /// Output index within the transaction, for transactions carrying
    /// several candy outputs.
    pub output_index: u32,
    pub time: DateTime<Local>,
    pub status: CandyStatus,
    pub watch_only: bool,
    pub asset_name: String,
    pub address: String,
    pub label: String,
    /// Raw amount in integer units at `decimals` precision. Corrective
    /// entries may be negative.
    pub amount: i64,
    pub decimals: u8,
    pub unit: String,
    /// Serialized transaction, hex encoded.
    pub raw_hex: String,
}

impl CandyRecord {
    /// Composite identifier distinguishing outputs of the same transaction.
    pub fn tx_id(&self) -> String {
        format!("{}-{:03}", self.txid, self.output_index)
    }

    pub fn formatted_date(&self) -> String {
        self.time.format(DATE_DISPLAY_FORMAT).to_string()
    }

    pub fn formatted_amount(&self, separators: SeparatorStyle) -> String {
        amounts::format_amount(self.amount, self.decimals, false, separators)
    }

    /// The text shown in the address column: the label when one is known,
    /// the raw address otherwise.
    pub fn display_address(&self) -> &str {
        if self.label.is_empty() {
            &self.address
        } else {
            &self.label
        }
    }

    /// Multi-line plain-text summary of the record, used by the details
    /// dialog and the copy-details actions.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![
            format!("Status: {}", self.status.label()),
            format!("Date: {}", self.formatted_date()),
        ];
        if self.watch_only {
            lines.push("Watch-only: yes".to_string());
        }
        lines.push(format!("Asset: {}", self.asset_name));
        lines.push(format!("Address: {}", self.address));
        if !self.label.is_empty() {
            lines.push(format!("Label: {}", self.label));
        }
        lines.push(format!(
            "Amount: {}",
            amounts::format_with_unit(
                self.amount,
                self.decimals,
                &self.unit,
                true,
                SeparatorStyle::Always,
            )
        ));
        lines.push(format!("ID: {}", self.tx_id()));
        lines.join("\n")
    }
}

/// Flat table of candy records, addressable by row index.
///
/// The model owns the rows; filtering and sorting happen in a separate
/// layer that works with row indices into this model.
#[derive(Default)]
pub struct CandyTableModel {
    records: Vec<CandyRecord>,
}

impl CandyTableModel {
    pub fn new(records: Vec<CandyRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CandyRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [CandyRecord] {
        &mut self.records
    }

    pub fn record(&self, index: usize) -> Option<&CandyRecord> {
        self.records.get(index)
    }

    /// Row index of a specific candy output.
    pub fn position_of(&self, txid: &TxHash, output_index: u32) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.txid == *txid && r.output_index == output_index)
    }

    pub fn has_watch_only(&self) -> bool {
        self.records.iter().any(|r| r.watch_only)
    }

    /// Mark every output of a transaction as abandoned, refreshing the
    /// display state of those rows. Returns the number of rows touched.
    pub fn set_abandoned(&mut self, txid: &TxHash) -> usize {
        let mut updated = 0;
        for record in self.records.iter_mut().filter(|r| r.txid == *txid) {
            record.status = CandyStatus::Abandoned;
            updated += 1;
        }
        updated
    }
}
