use xxhash_rust::xxh3::xxh3_64;

use crate::temperature::{Aggregate, Tenths};

#[derive(Debug, Clone)]
pub struct Entry {
    hash: u64,
    pub key: String,
    pub value: Aggregate,
}

/// Location name to [`Aggregate`], open addressing with linear probing.
///
/// Slots are matched on the full key, the hash only short-circuits the string
/// comparison, so two locations sharing a hash never share statistics.
#[derive(Debug, Clone)]
pub struct StationMap {
    table: Vec<Option<Entry>>,
    len: usize,
}

const INITIAL_CAPACITY: usize = 1024;

impl Default for StationMap {
    fn default() -> Self {
        Self::new()
    }
}

impl StationMap {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (capacity * 2).next_power_of_two().max(16);
        Self {
            table: vec![None; slots],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find_slot(&self, hash: u64, key: &str) -> usize {
        let mask = self.table.len() - 1;
        let mut slot = hash as usize & mask;
        loop {
            match &self.table[slot] {
                Some(entry) if entry.hash == hash && entry.key == key => return slot,
                Some(_) => slot = (slot + 1) & mask,
                None => return slot,
            }
        }
    }

    fn grow(&mut self) {
        let slots = self.table.len() * 2;
        let old = std::mem::replace(&mut self.table, vec![None; slots]);
        for entry in old.into_iter().flatten() {
            let slot = self.find_slot(entry.hash, &entry.key);
            self.table[slot] = Some(entry);
        }
    }

    fn insert_new(&mut self, hash: u64, key: String, value: Aggregate) {
        if (self.len + 1) * 2 > self.table.len() {
            self.grow();
        }
        let slot = self.find_slot(hash, &key);
        self.table[slot] = Some(Entry { hash, key, value });
        self.len += 1;
    }

    pub fn get(&self, key: &str) -> Option<&Aggregate> {
        let slot = self.find_slot(xxh3_64(key.as_bytes()), key);
        self.table[slot].as_ref().map(|entry| &entry.value)
    }

    /// Adds one reading for `key`, creating its aggregate on first sight.
    pub fn record(&mut self, key: &str, temperature: Tenths) {
        let hash = xxh3_64(key.as_bytes());
        let slot = self.find_slot(hash, key);
        if let Some(entry) = &mut self.table[slot] {
            entry.value.add(temperature);
        } else {
            self.insert_new(hash, key.to_string(), Aggregate::new(temperature));
        }
    }

    /// Folds a whole aggregate into `key`.
    pub fn merge_entry(&mut self, key: String, value: &Aggregate) {
        let hash = xxh3_64(key.as_bytes());
        let slot = self.find_slot(hash, &key);
        if let Some(entry) = &mut self.table[slot] {
            entry.value.merge(value);
        } else {
            self.insert_new(hash, key, *value);
        }
    }

    /// Combines two partial results. Associative and commutative, with the
    /// empty map as identity.
    pub fn merge(mut self, other: StationMap) -> StationMap {
        if self.len < other.len {
            return other.merge(self);
        }
        for entry in other.table.into_iter().flatten() {
            self.merge_entry(entry.key, &entry.value);
        }
        self
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Aggregate)> {
        self.table
            .iter()
            .flatten()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    /// Entries ordered by location, byte-wise ascending.
    pub fn sorted(&self) -> Vec<(&str, &Aggregate)> {
        let mut entries = self.iter().collect::<Vec<_>>();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

impl PartialEq for StationMap {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for StationMap {}

impl<'a> FromIterator<(&'a str, Tenths)> for StationMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, Tenths)>>(iter: I) -> Self {
        let mut map = StationMap::new();
        for (key, temperature) in iter {
            map.record(key, temperature);
        }
        map
    }
}
