use smallvec::{SmallVec, smallvec};

use crate::bytecode::{self, Direction};
use crate::tables;

/// Number of code points covered by one page.
pub(crate) const PAGE_LEN: usize = 256;

/// A materialised page: one slot per code point in a 256-aligned block.
/// A slot is `None` when the code point has no entry; a page with no
/// entries at all is not materialised in the first place.
pub(crate) type Slots<E> = [Option<E>; PAGE_LEN];

/// A replacement string of one to three code points, stored inline.
pub(crate) type Mapping = SmallVec<[char; 3]>;

/// One case table: an entry representation plus its page build rule.
pub(crate) trait Table {
    type Entry: Clone;

    /// Materialise the page covering `index << 8 ..= (index << 8) + 0xff`,
    /// or `None` when no code point in the block has an entry.
    fn build(index: u32) -> Option<Slots<Self::Entry>>;
}

/// Run `program` over one block, forwarding in-block emissions to `write`
/// as `(slot, to)`. Emissions below the block are skipped; the scan stops
/// at the first emission past it, which is sound because `from` values
/// only ever grow.
pub(crate) fn scan(
    program: &[u8],
    direction: Direction,
    index: u32,
    mut write: impl FnMut(usize, u32),
) {
    let first = index << 8;
    let last = first + 0xff;
    bytecode::run(program, direction, |from, to| {
        if from > last {
            return false;
        }
        if from >= first {
            write((from & 0xff) as usize, to);
        }
        true
    });
}

/// Upper-case string mappings. `TO_UPPER` seeds the single code point,
/// `SUFFIX_1` overrides it when a multi-character expansion exists, and
/// `SUFFIX_2`/`SUFFIX_3` append the remaining code points. A suffix
/// append onto an empty slot is unreachable on well-formed tables and is
/// ignored.
pub(crate) struct Upper;

impl Table for Upper {
    type Entry = Mapping;

    fn build(index: u32) -> Option<Slots<Mapping>> {
        let mut slots: Slots<Mapping> = [const { None }; PAGE_LEN];
        let mut any = false;
        scan(tables::TO_UPPER, Direction::Upper, index, |slot, to| {
            if let Some(ch) = char::from_u32(to) {
                slots[slot] = Some(smallvec![ch]);
                any = true;
            }
        });
        scan(tables::SUFFIX_1, Direction::Upper, index, |slot, to| {
            let Some(ch) = char::from_u32(to) else { return };
            if let Some(entry) = &mut slots[slot] {
                entry[0] = ch;
            } else {
                slots[slot] = Some(smallvec![ch]);
                any = true;
            }
        });
        for program in [tables::SUFFIX_2, tables::SUFFIX_3] {
            scan(program, Direction::Upper, index, |slot, to| {
                if let (Some(entry), Some(ch)) = (&mut slots[slot], char::from_u32(to)) {
                    entry.push(ch);
                }
            });
        }
        any.then_some(slots)
    }
}

/// Lower-case string mappings, always a single code point.
pub(crate) struct Lower;

impl Table for Lower {
    type Entry = Mapping;

    fn build(index: u32) -> Option<Slots<Mapping>> {
        let mut slots: Slots<Mapping> = [const { None }; PAGE_LEN];
        let mut any = false;
        scan(tables::TO_LOWER, Direction::Lower, index, |slot, to| {
            if let Some(ch) = char::from_u32(to) {
                slots[slot] = Some(smallvec![ch]);
                any = true;
            }
        });
        any.then_some(slots)
    }
}

/// Regex canonical forms: the raw code point emitted by `TO_UPPER`, with
/// no string conversion and no suffix programs.
pub(crate) struct Canonical;

impl Table for Canonical {
    type Entry = char;

    fn build(index: u32) -> Option<Slots<char>> {
        let mut slots: Slots<char> = [None; PAGE_LEN];
        let mut any = false;
        scan(tables::TO_UPPER, Direction::Upper, index, |slot, to| {
            if let Some(ch) = char::from_u32(to) {
                slots[slot] = Some(ch);
                any = true;
            }
        });
        any.then_some(slots)
    }
}

#[test]
fn test_upper_page_entries() {
    let page = Upper::build(0).unwrap();
    assert_eq!(page[b'a' as usize].as_deref(), Some(&['A'][..]));
    assert_eq!(page[b'z' as usize].as_deref(), Some(&['Z'][..]));
    assert_eq!(page[0xdf].as_deref(), Some(&['S', 'S'][..]));
    assert!(page[b'A' as usize].is_none());
    assert!(page[b'!' as usize].is_none());
}

#[test]
fn test_upper_page_suffix_override() {
    // ᾳ keeps its single-character mapping in TO_UPPER but the suffix
    // programs rewrite it to two capitals
    let page = Upper::build(0x1f).unwrap();
    assert_eq!(page[0xb3].as_deref(), Some(&['\u{391}', '\u{399}'][..]));
}

#[test]
fn test_lower_page_entries() {
    let page = Lower::build(0).unwrap();
    assert_eq!(page[b'A' as usize].as_deref(), Some(&['a'][..]));
    assert!(page[b'a' as usize].is_none());

    let deseret = Lower::build(0x104).unwrap();
    assert_eq!(deseret[0x00].as_deref(), Some(&['\u{10428}'][..]));
}

#[test]
fn test_caseless_block_is_absent() {
    assert!(Upper::build(0x30).is_none());
    assert!(Lower::build(0x30).is_none());
    assert!(Canonical::build(0x30).is_none());
}

#[test]
fn test_canonical_page_entries() {
    let page = Canonical::build(0x3).unwrap();
    assert_eq!(page[0xc2], Some('\u{3a3}'));
    assert_eq!(page[0xc3], Some('\u{3a3}'));
    assert!(page[0xa3].is_none());
}
