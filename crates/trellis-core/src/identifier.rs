//! View keys backed by a global string interner.
//!
//! Layout passes compare and hash view keys constantly (dependency edges,
//! hierarchy lookups, frame tables), so keys are interned once and carried
//! around as a `Copy` symbol.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Key`].
///
/// # Thread Safety
///
/// Access goes through a `Mutex`; keys themselves are plain symbols.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Identity of a layout node.
///
/// A key is only used for diagnostics, equality and lookups; it never takes
/// part in geometry.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::Key;
///
/// let header = Key::new("header");
/// assert_eq!(header, "header");
/// assert_eq!(header, Key::new("header"));
/// assert_ne!(header, Key::new("footer"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(DefaultSymbol);

impl Key {
    /// Creates a key from its textual name, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns the textual name of this key.
    pub fn name(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .map(str::to_owned)
                .unwrap_or_default()
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
