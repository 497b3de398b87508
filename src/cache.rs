use std::collections::HashMap;
use std::sync::Arc;

use crate::page::{Slots, Table};

/// Lazily materialised pages for one table, plus a one-entry hot slot.
///
/// Pages are built on first access and retained for the life of the
/// cache; an absent page (no entry anywhere in its block) is memoised as
/// `None` so the build runs once either way.
pub(crate) struct PageCache<T: Table> {
    pages: HashMap<u32, Option<Arc<Slots<T::Entry>>>>,
    last_index: Option<u32>,
    last_page: Option<Arc<Slots<T::Entry>>>,
}

impl<T: Table> PageCache<T> {
    pub(crate) fn new() -> Self {
        Self {
            pages: HashMap::new(),
            last_index: None,
            last_page: None,
        }
    }

    /// Entry for `code_point`. Consecutive look-ups inside one
    /// 256-code-point block bypass the map entirely.
    pub(crate) fn lookup(&mut self, code_point: u32) -> Option<&T::Entry> {
        let index = code_point >> 8;
        if self.last_index != Some(index) {
            let page = self
                .pages
                .entry(index)
                .or_insert_with(|| T::build(index).map(Arc::new))
                .clone();
            self.last_index = Some(index);
            self.last_page = page;
        }
        self.last_page.as_ref()?[code_point as usize & 0xff].as_ref()
    }
}

#[test]
fn test_pages_memoised_and_shared() {
    use crate::page::Upper;

    let mut cache = PageCache::<Upper>::new();
    assert!(cache.lookup(u32::from(b'a')).is_some());
    let first = Arc::as_ptr(cache.last_page.as_ref().unwrap());
    assert!(cache.lookup(0x3c2).is_some());
    assert!(cache.lookup(u32::from(b'b')).is_some());
    let again = Arc::as_ptr(cache.last_page.as_ref().unwrap());
    assert_eq!(first, again);
    assert_eq!(cache.pages.len(), 2);
}

#[test]
fn test_absent_pages_memoised() {
    use crate::page::Lower;

    let mut cache = PageCache::<Lower>::new();
    assert!(cache.lookup(0x3042).is_none());
    assert!(cache.lookup(0x3043).is_none());
    assert!(matches!(cache.pages.get(&0x30), Some(None)));
}
