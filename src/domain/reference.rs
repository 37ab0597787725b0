//! Resolving user-entered reference codes to records.

use std::fmt;

use non_empty_string::NonEmptyString;

use crate::domain::{RequestRecord, record::REFERENCE_CODE_LEN};

/// A trimmed, non-blank lookup key.
///
/// A key matches a record either as the record's full identifier (ignoring
/// case) or as its reference code: the identifier's first eight characters,
/// ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceKey {
    key: NonEmptyString,
    upper: String,
}

impl ReferenceKey {
    /// Parses a key from user input.
    ///
    /// Returns `None` if the input is blank.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let key = NonEmptyString::new(input.trim().to_string()).ok()?;
        let upper = key.as_str().to_uppercase();
        Some(Self { key, upper })
    }

    /// The trimmed key, as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.key.as_str()
    }

    /// Whether this key refers to the given record.
    #[must_use]
    pub fn matches(&self, record: &RequestRecord) -> bool {
        let id = record.id();
        if id.to_uppercase() == self.upper {
            return true;
        }

        let mut chars = id.char_indices().skip(REFERENCE_CODE_LEN);
        let prefix = match chars.next() {
            Some((end, _)) => &id[..end],
            None if id.chars().count() == REFERENCE_CODE_LEN => id,
            None => return false,
        };
        prefix.to_uppercase() == self.upper
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the first record, in snapshot order, that `key` refers to.
///
/// A blank key or a key matching nothing yields `None`.
pub fn resolve<'a, I>(records: I, key: &str) -> Option<&'a RequestRecord>
where
    I: IntoIterator<Item = &'a RequestRecord>,
{
    let key = ReferenceKey::parse(key)?;
    records.into_iter().find(|record| key.matches(record))
}
