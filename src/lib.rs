//! Candyview: a candy (asset airdrop) transaction history viewer.
//!
//! The library half of the crate holds the reusable pieces: the candy record
//! model, the filter/sort layer, amount formatting, persisted view
//! preferences, the wallet facade, explorer links, and CSV export. The `gui`
//! module wires them into an egui history-view widget plus a demo wallet
//! shell, launched by the binary.

pub mod addressbook;
pub mod amounts;
pub mod explorer;
pub mod export;
pub mod filter;
pub mod gui;
pub mod model;
pub mod settings;
pub mod wallet;
