use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// Destination for decoded entries.
///
/// A later `put` for an existing key overwrites the earlier value.
pub trait PropertySink {
    /// Stores one decoded entry.
    fn put(&mut self, key: String, value: String);
}

impl<T: PropertySink + ?Sized> PropertySink for &mut T {
    fn put(&mut self, key: String, value: String) {
        (**self).put(key, value);
    }
}

impl<S: BuildHasher> PropertySink for HashMap<String, String, S> {
    fn put(&mut self, key: String, value: String) {
        self.insert(key, value);
    }
}

impl PropertySink for BTreeMap<String, String> {
    fn put(&mut self, key: String, value: String) {
        self.insert(key, value);
    }
}
