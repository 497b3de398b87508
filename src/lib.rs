//! Unicode case conversion driven by compact bytecode tables.
//!
//! Five embedded programs describe the case mappings: single-character
//! upper and lower tables plus three suffix tables holding the extra code
//! points of multi-character upper-case expansions ("ß" becomes "SS").
//! A small interpreter walks a program and emits `(from, to)` code point
//! pairs in ascending order; 256-code-point pages are materialised from
//! those emissions on first access and cached for the life of the mapper.
//!
//! [`CaseMapper`] owns the caches. The free functions below keep one
//! mapper per thread.
//!
//! ```
//! assert_eq!(caseconv::to_upper("Schloß"), "SCHLOSS");
//! assert_eq!(caseconv::regexp_canonicalize('ς'), 'Σ');
//! ```

use std::borrow::Cow;
use std::cell::RefCell;
use std::sync::Arc;

/// Table bytecode interpreter
pub mod bytecode;
/// Embedded case-mapping programs
pub mod tables;

mod cache;
mod classes;
mod mapper;
mod page;

pub use self::mapper::CaseMapper;

thread_local! {
    static MAPPER: RefCell<CaseMapper> = RefCell::new(CaseMapper::new());
}

/// Upper-case `s` using this thread's mapper.
///
/// Returns the input slice itself when no code point changes.
pub fn to_upper(s: &str) -> Cow<'_, str> {
    MAPPER.with(|mapper| mapper.borrow_mut().to_upper(s))
}

/// Lower-case `s` using this thread's mapper.
///
/// Returns the input slice itself when no code point changes.
pub fn to_lower(s: &str) -> Cow<'_, str> {
    MAPPER.with(|mapper| mapper.borrow_mut().to_lower(s))
}

/// The ECMAScript 5 regex canonical form of `c`.
pub fn regexp_canonicalize(c: char) -> char {
    MAPPER.with(|mapper| mapper.borrow_mut().regexp_canonicalize(c))
}

/// Every code point matching `c` case-insensitively, or `None` when `c`
/// matches only itself.
pub fn regexp_equivalence_class(c: char) -> Option<Arc<[char]>> {
    MAPPER.with(|mapper| mapper.borrow_mut().regexp_equivalence_class(c))
}
