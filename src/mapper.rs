use std::borrow::Cow;
use std::sync::Arc;

use crate::cache::PageCache;
use crate::classes::Equivalence;
use crate::page::{Canonical, Lower, Mapping, Table, Upper};

/// Case conversion and regex case-equivalence look-ups.
///
/// A mapper owns four page caches (upper, lower, canonical and
/// equivalence) that fill in lazily and are never evicted, so look-ups
/// get cheaper as a mapper warms up. Mappers are cheap to create and
/// meant to be thread-confined; the crate-level functions keep one per
/// thread.
pub struct CaseMapper {
    upper: PageCache<Upper>,
    lower: PageCache<Lower>,
    canonical: PageCache<Canonical>,
    classes: PageCache<Equivalence>,
}

impl CaseMapper {
    #[must_use]
    pub fn new() -> Self {
        Self {
            upper: PageCache::new(),
            lower: PageCache::new(),
            canonical: PageCache::new(),
            classes: PageCache::new(),
        }
    }

    /// Upper-case `s`.
    ///
    /// Multi-character expansions apply ("ß" becomes "SS"), so the result
    /// can be longer than the input. When no code point changes the input
    /// slice itself is returned and nothing is allocated.
    pub fn to_upper<'a>(&mut self, s: &'a str) -> Cow<'a, str> {
        convert(&mut self.upper, s)
    }

    /// Lower-case `s`.
    ///
    /// When no code point changes the input slice itself is returned and
    /// nothing is allocated.
    pub fn to_lower<'a>(&mut self, s: &'a str) -> Cow<'a, str> {
        convert(&mut self.lower, s)
    }

    /// The ECMAScript 5 regex canonical form of `c`: its single-character
    /// upper-case mapping, or `c` itself when the table has none.
    pub fn regexp_canonicalize(&mut self, c: char) -> char {
        self.canonical.lookup(c as u32).copied().unwrap_or(c)
    }

    /// Every code point matching `c` case-insensitively, canonical form
    /// first, or `None` when `c` matches only itself. The order is stable
    /// across calls.
    pub fn regexp_equivalence_class(&mut self, c: char) -> Option<Arc<[char]>> {
        self.classes.lookup(c as u32).cloned()
    }
}

impl Default for CaseMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream `s` through `cache`, copying unchanged runs as whole slices and
/// splicing in mapped replacements. The output buffer exists only once
/// the first mapping fires.
fn convert<'a, T>(cache: &mut PageCache<T>, s: &'a str) -> Cow<'a, str>
where
    T: Table<Entry = Mapping>,
{
    let mut out: Option<String> = None;
    let mut run_start = 0;
    for (i, ch) in s.char_indices() {
        let Some(mapping) = cache.lookup(ch as u32) else {
            continue;
        };
        let out = out.get_or_insert_with(|| String::with_capacity(s.len() + 8));
        out.push_str(&s[run_start..i]);
        out.extend(mapping.iter());
        run_start = i + ch.len_utf8();
    }
    match out {
        None => Cow::Borrowed(s),
        Some(mut done) => {
            done.push_str(&s[run_start..]);
            Cow::Owned(done)
        }
    }
}
