//! A string table with a defaults chain, plus the load entry points.

use std::{
    collections::{BTreeSet, HashMap},
    fs::File,
    io::Read,
    path::Path,
};

use crate::{
    CharRead, LineReader, ParserError, ParserOptions, PropertySink, StrSource, Utf8Source,
    entry::load_into, error::ErrorSource,
};

/// Decoded properties, optionally backed by a table of defaults.
///
/// Lookups through [`get_property`](Self::get_property) fall back to the
/// defaults chain; [`get`](Self::get) only sees this table.
///
/// # Examples
///
/// ```rust
/// use propstream::Properties;
///
/// let mut defaults = Properties::new();
/// defaults.set_property("color", "blue");
///
/// let mut props = Properties::with_defaults(defaults);
/// props.load_str("# settings\nsize = 10\n").unwrap();
///
/// assert_eq!(props.get_property("size"), Some("10"));
/// assert_eq!(props.get_property("color"), Some("blue"));
/// assert_eq!(props.get("color"), None);
/// assert_eq!(props.get_property_or("shape", "round"), "round");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Properties {
    table: HashMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    defaults: Option<Box<Properties>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    options: ParserOptions,
}

impl Properties {
    /// Empty table without defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table that falls back to `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: Properties) -> Self {
        Self {
            defaults: Some(Box::new(defaults)),
            ..Self::default()
        }
    }

    /// Empty table whose loads use `options`.
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The defaults this table falls back to.
    #[must_use]
    pub fn defaults(&self) -> Option<&Properties> {
        self.defaults.as_deref()
    }

    /// Value stored in this table, ignoring defaults.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(String::as_str)
    }

    /// Value for `key`, searching the defaults chain when this table has
    /// none.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.get(key)
            .or_else(|| self.defaults.as_ref()?.get_property(key))
    }

    /// Like [`get_property`](Self::get_property), returning `default` when
    /// the key is found nowhere.
    #[must_use]
    pub fn get_property_or<'s>(&'s self, key: &str, default: &'s str) -> &'s str {
        self.get_property(key).unwrap_or(default)
    }

    /// Stores `value` under `key`, returning the previous value of this
    /// table.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.table.insert(key.into(), value.into())
    }

    /// Number of entries in this table, defaults excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if this table holds no entries. Defaults are not
    /// consulted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Keys of this table in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Entries of this table in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every key visible through [`get_property`](Self::get_property),
    /// defaults included.
    #[must_use]
    pub fn property_names(&self) -> BTreeSet<&str> {
        let mut names = self
            .defaults
            .as_ref()
            .map(|d| d.property_names())
            .unwrap_or_default();
        names.extend(self.keys());
        names
    }

    /// Same as [`property_names`](Self::property_names). Every value is a
    /// string, so no key is filtered out.
    #[must_use]
    pub fn string_property_names(&self) -> BTreeSet<&str> {
        self.property_names()
    }

    /// Consumes the table, dropping the defaults.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, String> {
        self.table
    }

    /// Loads from a byte source. Each byte is one ISO-8859-1 character.
    ///
    /// Returns the number of entries read. Entries loaded before an error
    /// are kept.
    ///
    /// # Errors
    /// I/O errors of `reader` and malformed escapes.
    pub fn load_bytes(&mut self, reader: impl Read) -> Result<usize, ParserError> {
        let options = self.options;
        load_into(self, LineReader::from_bytes(reader), options)
    }

    /// Loads from a character source.
    ///
    /// # Errors
    /// I/O errors of `reader` and malformed escapes.
    pub fn load_chars(&mut self, reader: impl CharRead) -> Result<usize, ParserError> {
        let options = self.options;
        load_into(self, LineReader::from_chars(reader), options)
    }

    /// Loads from text already in memory.
    ///
    /// # Errors
    /// Malformed escapes.
    pub fn load_str(&mut self, text: &str) -> Result<usize, ParserError> {
        self.load_chars(StrSource::new(text))
    }

    /// Loads UTF-8 encoded bytes. Invalid sequences become U+FFFD.
    ///
    /// # Errors
    /// Malformed escapes.
    pub fn load_utf8(&mut self, bytes: &[u8]) -> Result<usize, ParserError> {
        self.load_chars(Utf8Source::new(bytes))
    }

    /// Opens `path` and loads it as a byte source.
    ///
    /// # Errors
    /// [`ErrorSource::XmlUnsupported`] for paths ending in `xml`, otherwise
    /// I/O errors and malformed escapes.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, ParserError> {
        let path = path.as_ref();
        if path.as_os_str().to_string_lossy().ends_with("xml") {
            return Err(ParserError::new(
                ErrorSource::XmlUnsupported(path.to_path_buf()),
                0,
            ));
        }
        log::debug!("loading properties from {}", path.display());
        let file = File::open(path).map_err(|e| ParserError::new(e, 0))?;
        self.load_bytes(file)
    }
}

impl PropertySink for Properties {
    fn put(&mut self, key: String, value: String) {
        self.table.insert(key, value);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            table: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }
}
