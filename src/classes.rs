use std::collections::HashMap;
use std::sync::Arc;

use crate::bytecode::{self, Direction};
use crate::page::{self, PAGE_LEN, Slots, Table};
use crate::tables;

/// Case-insensitive equivalence classes for the regex engine.
///
/// A class collects every code point sharing a canonical upper-case
/// form and is keyed by that form, which always sits first. ECMAScript 5
/// regex case-independence (21.2.2.8.2) forbids ASCII and non-ASCII code
/// points from ending up equivalent, so emissions straddling the ASCII
/// boundary contribute no edge: "ſ" does not join the class of "s".
pub(crate) struct Equivalence;

fn splits_ascii(from: u32, to: u32) -> bool {
    (from <= 0x7f) != (to <= 0x7f)
}

impl Table for Equivalence {
    type Entry = Arc<[char]>;

    fn build(index: u32) -> Option<Slots<Arc<[char]>>> {
        let first = index << 8;
        let last = first + 0xff;
        let mut members: HashMap<u32, Vec<u32>> = HashMap::new();
        let mut keys: [Option<u32>; PAGE_LEN] = [None; PAGE_LEN];

        // First pass: in-block sources, keyed by their upper-case target.
        page::scan(tables::TO_UPPER, Direction::Upper, index, |slot, to| {
            let from = first + slot as u32;
            if splits_ascii(from, to) {
                return;
            }
            members.entry(to).or_insert_with(|| vec![to]).push(from);
            keys[slot] = Some(to);
        });

        // Untouched code points start out as their own singleton class;
        // an in-block canonical instead joins the class discovered above.
        for code_point in first..=last {
            let slot = (code_point & 0xff) as usize;
            if keys[slot].is_none() {
                members.entry(code_point).or_insert_with(|| vec![code_point]);
                keys[slot] = Some(code_point);
            }
        }

        // Second pass: sources anywhere in the program whose target is a
        // class of this block ("ÿ" pulls in nothing here, but the page
        // holding "Ÿ" picks up "ÿ" this way).
        bytecode::run(tables::TO_UPPER, Direction::Upper, |from, to| {
            if splits_ascii(from, to) {
                return true;
            }
            if let Some(class) = members.get_mut(&to) {
                if !class.contains(&from) {
                    class.push(from);
                }
            }
            true
        });

        // Compaction: singleton classes collapse back to empty slots, and
        // surviving classes are shared between the slots they cover.
        let mut shared: HashMap<u32, Arc<[char]>> = HashMap::new();
        let mut slots: Slots<Arc<[char]>> = [const { None }; PAGE_LEN];
        let mut any = false;
        for (slot, key) in keys.iter().enumerate() {
            let Some(key) = key else { continue };
            let class = &members[key];
            if class.len() < 2 {
                continue;
            }
            let entry = shared.entry(*key).or_insert_with(|| {
                class.iter().filter_map(|&c| char::from_u32(c)).collect()
            });
            slots[slot] = Some(entry.clone());
            any = true;
        }
        any.then_some(slots)
    }
}

#[test]
fn test_ascii_letters_pair_up() {
    let page = Equivalence::build(0).unwrap();
    assert_eq!(page[b's' as usize].as_deref(), Some(&['S', 's'][..]));
    assert_eq!(page[b'S' as usize].as_deref(), Some(&['S', 's'][..]));
    assert!(page[b'!' as usize].is_none());
    assert!(page[b'0' as usize].is_none());
}

#[test]
fn test_class_shared_between_slots() {
    let page = Equivalence::build(0).unwrap();
    let lower = page[b's' as usize].as_ref().unwrap();
    let upper = page[b'S' as usize].as_ref().unwrap();
    assert!(Arc::ptr_eq(lower, upper));
}

#[test]
fn test_sigma_class_order() {
    let page = Equivalence::build(3).unwrap();
    let want = Some(&['\u{3a3}', '\u{3c2}', '\u{3c3}'][..]);
    assert_eq!(page[0xa3].as_deref(), want);
    assert_eq!(page[0xc2].as_deref(), want);
    assert_eq!(page[0xc3].as_deref(), want);
}

#[test]
fn test_cross_block_siblings() {
    // Ÿ sits at 0x178; its lower-case partner lives a block below
    let page = Equivalence::build(1).unwrap();
    assert_eq!(page[0x78].as_deref(), Some(&['\u{178}', '\u{ff}'][..]));
}

#[test]
fn test_ascii_boundary_filtered() {
    // Long s upper-cases to S but may not join an ASCII class
    let page = Equivalence::build(1);
    assert!(page.unwrap()[0x7f].is_none());
}
