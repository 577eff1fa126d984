//! String interner for name deduplication.
//!
//! Type names, method names, keyword names and type variables are interned
//! into a pool and passed around as u32 indices (Atoms). Comparing and hashing
//! names inside the subtype cache becomes integer work instead of string work.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// An interned string identifier.
///
/// Atoms are cheap to copy (just a u32) and can be compared with == in O(1).
/// To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// A sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    /// Check if this is the empty/none atom.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Get the raw index value.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

const COMMON_STRINGS: &[&str] = &[
    // Core classes and modules
    "BasicObject",
    "Object",
    "Kernel",
    "Comparable",
    "Enumerable",
    "Integer",
    "Float",
    "Numeric",
    "String",
    "Symbol",
    "Array",
    "Hash",
    "Range",
    "Proc",
    "NilClass",
    "TrueClass",
    "FalseClass",
    // Common method names
    "initialize",
    "new",
    "each",
    "map",
    "select",
    "to_s",
    "to_a",
    "to_h",
    "to_proc",
    "hash",
    "eql?",
    "==",
    "===",
    "<=>",
    "[]",
    "[]=",
    "+",
    "-",
    "call",
    "yield",
    "size",
    "length",
    // Common type parameter names
    "T",
    "U",
    "K",
    "V",
    "A",
    "Elem",
];

/// String interner that deduplicates strings and returns Atom handles.
///
/// # Example
/// ```
/// use rbz_common::interner::Interner;
/// let mut interner = Interner::new();
/// let a1 = interner.intern("each");
/// let a2 = interner.intern("each");
/// assert_eq!(a1, a2); // Same atom for same string
/// assert_eq!(interner.resolve(a1), "each");
/// ```
#[derive(Default)]
pub struct Interner {
    /// Map from string to atom index
    map: FxHashMap<Arc<str>, Atom>,
    /// Vector of all interned strings (index 0 is empty string)
    strings: Vec<Arc<str>>,
}

impl Interner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut interner = Interner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        // Index 0 is reserved for empty/none
        let empty: Arc<str> = Arc::from("");
        interner.strings.push(empty.clone());
        interner.map.insert(empty, Atom::NONE);
        interner
    }

    /// Intern a string, returning its Atom handle.
    /// If the string was already interned, returns the existing Atom.
    #[inline]
    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&atom) = self.map.get(s) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        let owned: Arc<str> = Arc::from(s);
        self.strings.push(owned.clone());
        self.map.insert(owned, atom);
        atom
    }

    /// Look up an already interned string without inserting it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<Atom> {
        self.map.get(s).copied()
    }

    /// Resolve an Atom back to its string value.
    /// Returns empty string if atom is out of bounds.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.strings
            .get(atom.0 as usize)
            .map(|s| s.as_ref())
            .unwrap_or("")
    }

    /// Try to resolve an Atom, returning None if invalid.
    #[inline]
    pub fn try_resolve(&self, atom: Atom) -> Option<&str> {
        self.strings.get(atom.0 as usize).map(|s| s.as_ref())
    }

    /// Get the number of interned strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the interner is empty (only has the empty string).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }

    /// Pre-intern core class names and frequent method names.
    pub fn intern_common(&mut self) {
        for s in COMMON_STRINGS {
            self.intern(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_none() {
        let mut interner = Interner::new();
        assert_eq!(interner.intern(""), Atom::NONE);
        assert!(interner.is_empty());
    }

    #[test]
    fn test_intern_deduplicates() {
        let mut interner = Interner::new();
        let each = interner.intern("each");
        let map = interner.intern("map");
        assert_ne!(each, map);
        assert_eq!(interner.intern("each"), each);
        assert_eq!(interner.resolve(map), "map");
        assert_eq!(interner.len(), 3);
    }

    #[test]
    fn test_get_does_not_insert() {
        let mut interner = Interner::new();
        assert_eq!(interner.get("to_s"), None);
        let to_s = interner.intern("to_s");
        assert_eq!(interner.get("to_s"), Some(to_s));
    }

    #[test]
    fn test_out_of_range_atom_resolves_empty() {
        let interner = Interner::new();
        assert_eq!(interner.resolve(Atom(42)), "");
        assert_eq!(interner.try_resolve(Atom(42)), None);
    }

    #[test]
    fn test_intern_common_is_idempotent() {
        let mut interner = Interner::new();
        interner.intern_common();
        let len = interner.len();
        interner.intern_common();
        assert_eq!(interner.len(), len);
        assert!(interner.get("Enumerable").is_some());
    }
}
