//! The wallet's address book: labeled send/receive addresses.
//!
//! The history view resolves row addresses here to decide how the edit-label
//! dialog should open (existing receiving entry, existing sending entry, or a
//! brand-new sending entry pre-filled with the address).

/// Whether an entry is one of our own receiving addresses or a destination we
/// send to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressType {
    Receiving,
    Sending,
}

impl AddressType {
    pub fn label(&self) -> &'static str {
        match self {
            AddressType::Receiving => "Receiving",
            AddressType::Sending => "Sending",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AddressBookEntry {
    pub address: String,
    pub label: String,
    pub entry_type: AddressType,
}

/// In-memory address book, addressed by exact address string.
#[derive(Default)]
pub struct AddressBook {
    entries: Vec<AddressBookEntry>,
}

impl AddressBook {
    pub fn new(entries: Vec<AddressBookEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AddressBookEntry] {
        &self.entries
    }

    pub fn lookup(&self, address: &str) -> Option<&AddressBookEntry> {
        self.entries.iter().find(|e| e.address == address)
    }

    /// Update the label of an existing entry. Returns false when the address
    /// is unknown.
    pub fn set_label(&mut self, address: &str, label: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.address == address) {
            Some(entry) => {
                entry.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Add a new sending entry. Returns false if the address already exists
    /// (the existing entry is left untouched).
    pub fn add_sending(&mut self, address: impl Into<String>, label: impl Into<String>) -> bool {
        let address = address.into();
        if self.lookup(&address).is_some() {
            return false;
        }
        self.entries.push(AddressBookEntry {
            address,
            label: label.into(),
            entry_type: AddressType::Sending,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> AddressBook {
        AddressBook::new(vec![
            AddressBookEntry {
                address: "Xrecv111".to_string(),
                label: "My airdrop address".to_string(),
                entry_type: AddressType::Receiving,
            },
            AddressBookEntry {
                address: "Xsend222".to_string(),
                label: "Faucet operator".to_string(),
                entry_type: AddressType::Sending,
            },
        ])
    }

    // ==================== lookup tests ====================

    #[test]
    fn test_lookup_known_addresses() {
        let book = book();
        assert_eq!(
            book.lookup("Xrecv111").unwrap().entry_type,
            AddressType::Receiving
        );
        assert_eq!(
            book.lookup("Xsend222").unwrap().entry_type,
            AddressType::Sending
        );
    }

    #[test]
    fn test_lookup_unknown_address_is_none() {
        assert!(book().lookup("Xmissing").is_none());
    }

    // ==================== set_label tests ====================

    #[test]
    fn test_set_label_updates_existing_entry() {
        let mut book = book();
        assert!(book.set_label("Xrecv111", "Renamed"));
        assert_eq!(book.lookup("Xrecv111").unwrap().label, "Renamed");
    }

    #[test]
    fn test_set_label_unknown_address_fails() {
        let mut book = book();
        assert!(!book.set_label("Xmissing", "Renamed"));
    }

    // ==================== add_sending tests ====================

    #[test]
    fn test_add_sending_inserts_new_entry() {
        let mut book = book();
        assert!(book.add_sending("Xnew333", "New contact"));

        let entry = book.lookup("Xnew333").unwrap();
        assert_eq!(entry.label, "New contact");
        assert_eq!(entry.entry_type, AddressType::Sending);
    }

    #[test]
    fn test_add_sending_duplicate_address_fails() {
        let mut book = book();
        assert!(!book.add_sending("Xrecv111", "Clobber"));
        // Original entry untouched
        assert_eq!(book.lookup("Xrecv111").unwrap().label, "My airdrop address");
        assert_eq!(
            book.lookup("Xrecv111").unwrap().entry_type,
            AddressType::Receiving
        );
    }
}
