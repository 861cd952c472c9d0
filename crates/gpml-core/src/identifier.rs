//! Element identifiers backed by string interning.
//!
//! Every identity-bearing pathway element is keyed by an [`ElementId`]. The
//! textual form is what appears in GPML as `elementId`/`GraphId`; the interned
//! symbol makes the id `Copy` so it can be stored freely in relationship fields
//! of the model arena.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for element identifiers.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner. The
/// interner only ever grows; it never hands out the same symbol for two
/// different strings.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> std::sync::MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Identifier of a pathway element.
///
/// # Examples
///
/// ```
/// use gpml_core::identifier::ElementId;
///
/// let a = ElementId::new("d7d3c");
/// let b: ElementId = "d7d3c".into();
/// assert_eq!(a, b);
/// assert_eq!(a, "d7d3c");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(DefaultSymbol);

impl ElementId {
    /// Creates an `ElementId` from its textual form.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns the textual form of this identifier.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{str_value}")
    }
}

impl std::str::FromStr for ElementId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ElementId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Produces identifiers that are unused within one pathway model.
///
/// Identifiers have the form `id` followed by eight lowercase hex digits. The
/// generator is a counter; callers pass a predicate telling it which ids are
/// already taken so that ids read from documents are never reissued.
#[derive(Debug, Default, Clone)]
pub struct ElementIdGenerator {
    next: u32,
}

impl ElementIdGenerator {
    /// Creates a generator starting at `id00000000`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next identifier for which `is_taken` returns `false`.
    pub fn generate(&mut self, is_taken: impl Fn(ElementId) -> bool) -> ElementId {
        loop {
            let candidate = ElementId::new(&format!("id{:08x}", self.next));
            self.next = self.next.wrapping_add(1);
            if !is_taken(candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = ElementId::new("abc12");
        let id2 = ElementId::new("abc12");
        let id3 = ElementId::new("def34");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "abc12");
    }

    #[test]
    fn test_display_trait() {
        let id = ElementId::new("display_test");
        assert_eq!(format!("{}", id), "display_test");
        assert_eq!(id.as_string(), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: ElementId = "test_string".into();
        let id2 = ElementId::new("test_string");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = ElementId::new("Rectangle");
        assert!(id == "Rectangle");
        assert!(id != "Oval");

        let empty = ElementId::new("");
        assert!(empty == "");
    }

    #[test]
    fn test_generator_sequence() {
        let mut generator = ElementIdGenerator::new();
        let first = generator.generate(|_| false);
        let second = generator.generate(|_| false);
        assert_eq!(first, "id00000000");
        assert_eq!(second, "id00000001");
    }

    #[test]
    fn test_generator_skips_taken() {
        let taken: HashSet<ElementId> = ["id00000000", "id00000001"]
            .into_iter()
            .map(ElementId::new)
            .collect();
        let mut generator = ElementIdGenerator::new();
        let id = generator.generate(|candidate| taken.contains(&candidate));
        assert_eq!(id, "id00000002");
    }
}
