//! Deduplicated, insertion-ordered recipient sets.

use bgeo_types::{Address, Amount, RecipientEntry};
use std::collections::HashMap;

/// A deduplicated set of airdrop recipients.
///
/// Entries keep the order their address was first seen in the input. When an
/// address repeats, its amounts are summed in place and the entry keeps its
/// original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipientSet {
    entries: Vec<RecipientEntry>,
    index: HashMap<Address, usize>,
}

impl RecipientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from entries, merging duplicates as they are inserted.
    pub fn from_entries(entries: impl IntoIterator<Item = RecipientEntry>) -> Self {
        let mut set = Self::new();
        for entry in entries {
            set.insert(entry);
        }
        set
    }

    /// Insert one entry, summing the amount into an existing entry when the
    /// address is already present.
    pub fn insert(&mut self, entry: RecipientEntry) {
        match self.index.get(&entry.address) {
            Some(&position) => {
                let existing = &mut self.entries[position];
                existing.amount = existing.amount.plus(&entry.amount);
            }
            None => {
                self.index.insert(entry.address.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the summed amount for an address.
    pub fn amount_for(&self, address: &Address) -> Option<&Amount> {
        self.index
            .get(address)
            .map(|&position| &self.entries[position].amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipientEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[RecipientEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RecipientEntry> {
        self.entries
    }

    /// Sum of every entry's amount.
    pub fn total(&self) -> Amount {
        self.entries
            .iter()
            .fold(Amount::zero(), |total, entry| total.plus(&entry.amount))
    }

    /// Render the set back to `address,amount` lines.
    ///
    /// Re-parsing the rendered text yields an equal set.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry.address.as_str());
            out.push(',');
            out.push_str(entry.amount.as_str());
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a RecipientSet {
    type Item = &'a RecipientEntry;
    type IntoIter = std::slice::Iter<'a, RecipientEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
