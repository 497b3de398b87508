use std::borrow::Cow;

use caseconv::CaseMapper;
use caseconv::bytecode::{self, Direction};
use caseconv::{tables, to_lower, to_upper};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_conversion_vectors() {
    let mut mapper = CaseMapper::new();
    let vectors = [
        ("foo", "FOO", "foo"),
        ("Schloß", "SCHLOSS", "schloß"),
        ("", "", ""),
        ("\u{10400}", "\u{10400}", "\u{10428}"),
        ("\u{10428}", "\u{10400}", "\u{10428}"),
        ("\u{149}", "\u{2bc}N", "\u{149}"),
        ("\u{1fb3}", "\u{391}\u{399}", "\u{1fb3}"),
        ("Größe", "GRÖSSE", "größe"),
        ("ΣΤΊΓΜΑ", "ΣΤΊΓΜΑ", "στίγμα"),
        ("mixed CASE 123", "MIXED CASE 123", "mixed case 123"),
    ];
    for (input, upper, lower) in vectors {
        assert_eq!(mapper.to_upper(input), upper, "to_upper({input:?})");
        assert_eq!(mapper.to_lower(input), lower, "to_lower({input:?})");
    }
}

#[test]
fn test_identity_returns_input() {
    let mut mapper = CaseMapper::new();
    for s in ["", "FOO.", "\u{10400}", "123 !?", "ΑΙ"] {
        assert!(matches!(mapper.to_upper(s), Cow::Borrowed(_)), "{s:?}");
    }
    for s in ["", "foo.", "\u{10428}", "123 !?", "ᾳι"] {
        assert!(matches!(mapper.to_lower(s), Cow::Borrowed(_)), "{s:?}");
    }
    // a single mapped character anywhere forces a copy
    assert!(matches!(mapper.to_upper("FOo"), Cow::Owned(_)));
}

#[test]
fn test_concatenation_composition() {
    let affixes = ["", "a", "A", ".", "\u{10400}"];
    let samples = ["foo", "Schloß", "", "\u{10400}", "\u{149}", "\u{1fb3}", "στίγμα"];
    let mut mapper = CaseMapper::new();
    for prefix in affixes {
        for sample in samples {
            for suffix in affixes {
                let whole = format!("{prefix}{sample}{suffix}");
                let upper_parts = format!(
                    "{}{}{}",
                    mapper.to_upper(prefix),
                    mapper.to_upper(sample),
                    mapper.to_upper(suffix)
                );
                assert_eq!(mapper.to_upper(&whole), upper_parts, "{whole:?}");
                let lower_parts = format!(
                    "{}{}{}",
                    mapper.to_lower(prefix),
                    mapper.to_lower(sample),
                    mapper.to_lower(suffix)
                );
                assert_eq!(mapper.to_lower(&whole), lower_parts, "{whole:?}");
            }
        }
    }
}

#[test]
fn test_idempotence() {
    let mut mapper = CaseMapper::new();
    for s in ["foo", "Schloß", "στίγμας", "\u{10400}\u{10428}", "ǅungla"] {
        let upper = mapper.to_upper(s).into_owned();
        assert_eq!(mapper.to_upper(&upper), upper, "{s:?}");
        let lower = mapper.to_lower(s).into_owned();
        assert_eq!(mapper.to_lower(&lower), lower, "{s:?}");
    }
}

#[test]
fn test_regexp_canonicalize() {
    let mut mapper = CaseMapper::new();
    let vectors = [
        ('!', '!'),
        ('s', 'S'),
        ('S', 'S'),
        ('\u{3c2}', '\u{3a3}'),
        ('\u{3c3}', '\u{3a3}'),
        ('\u{3a3}', '\u{3a3}'),
        ('\u{df}', '\u{df}'),
        ('\u{10428}', '\u{10400}'),
    ];
    for (input, want) in vectors {
        assert_eq!(mapper.regexp_canonicalize(input), want, "{input:?}");
    }
}

#[test]
fn test_regexp_equivalence_classes() {
    let mut mapper = CaseMapper::new();
    assert_eq!(mapper.regexp_equivalence_class('!'), None);
    assert_eq!(mapper.regexp_equivalence_class('\u{df}'), None);

    let s_class = mapper.regexp_equivalence_class('s').unwrap();
    assert_eq!(&s_class[..], ['S', 's']);
    let upper_s_class = mapper.regexp_equivalence_class('S').unwrap();
    assert_eq!(&upper_s_class[..], ['S', 's']);

    for sigma in ['\u{3a3}', '\u{3c2}', '\u{3c3}'] {
        let class = mapper.regexp_equivalence_class(sigma).unwrap();
        assert_eq!(&class[..], ['\u{3a3}', '\u{3c2}', '\u{3c3}'], "{sigma:?}");
    }

    let kelvin = mapper.regexp_equivalence_class('\u{212a}');
    assert_eq!(kelvin, None);
}

#[test]
fn test_ascii_classes_stay_ascii() {
    let mut mapper = CaseMapper::new();
    for code_point in 0..0x80u32 {
        let c = char::from_u32(code_point).unwrap();
        if let Some(class) = mapper.regexp_equivalence_class(c) {
            assert!(class.iter().all(|&m| m.is_ascii()), "{c:?}: {class:?}");
        }
    }
    // the one-way partners stay singletons instead
    assert_eq!(mapper.regexp_equivalence_class('\u{17f}'), None);
    assert_eq!(mapper.regexp_equivalence_class('\u{131}'), None);
}

#[test]
fn test_canonical_membership() {
    let mut mapper = CaseMapper::new();
    let blocks = (0u32..0x600)
        .chain(0x1e00..0x2000)
        .chain(0x2c00..0x2d00)
        .chain(0x10400..0x10450);
    for code_point in blocks {
        let Some(c) = char::from_u32(code_point) else {
            continue;
        };
        let Some(class) = mapper.regexp_equivalence_class(c) else {
            continue;
        };
        assert!(class.len() >= 2, "{c:?}");
        assert!(class.contains(&c), "{c:?} missing from its own class");
        let canonical = mapper.regexp_canonicalize(c);
        assert_eq!(class[0], canonical, "{c:?} class must lead with its canonical");
        for &member in class.iter() {
            assert_eq!(
                mapper.regexp_canonicalize(member),
                canonical,
                "{member:?} in class of {c:?}"
            );
        }
    }
}

#[test]
fn test_canonical_self_map() {
    let mut mapper = CaseMapper::new();
    for code_point in 0..0x600u32 {
        let Some(c) = char::from_u32(code_point) else {
            continue;
        };
        if mapper.regexp_canonicalize(c) == c {
            match mapper.regexp_equivalence_class(c) {
                None => {}
                Some(class) => assert!(class.contains(&c), "{c:?}"),
            }
        }
    }
}

#[test]
fn test_embedded_tables_validate() {
    let programs = [
        (tables::TO_UPPER, Direction::Upper),
        (tables::SUFFIX_1, Direction::Upper),
        (tables::SUFFIX_2, Direction::Upper),
        (tables::SUFFIX_3, Direction::Upper),
        (tables::TO_LOWER, Direction::Lower),
    ];
    for (program, direction) in programs {
        assert!(bytecode::validate(program, direction).is_ok());
    }
    assert!(bytecode::validate(tables::TO_UPPER, Direction::Upper).unwrap() > 1000);
    assert!(bytecode::validate(tables::TO_LOWER, Direction::Lower).unwrap() > 1000);
}

#[test]
fn test_thread_local_functions() {
    assert_eq!(to_upper("Schloß"), "SCHLOSS");
    assert_eq!(to_lower("SCHLOSS"), "schloss");
    assert_eq!(caseconv::regexp_canonicalize('k'), 'K');
    let class = caseconv::regexp_equivalence_class('k').unwrap();
    assert_eq!(&class[..], ['K', 'k']);
}

fn random_string(rng: &mut StdRng) -> String {
    const POOL: &[&str] = &[
        "abcdefgsz",
        "ABCDEFGSZ",
        "äöüßÿµ",
        "αβγςσΣΩ",
        "абвгАБВГ",
        "\u{10400}\u{10428}\u{1fb3}\u{149}",
        " .!?0123",
    ];
    let len = rng.gen_range(0..24);
    (0..len)
        .map(|_| {
            let pool: Vec<char> = POOL[rng.gen_range(0..POOL.len())].chars().collect();
            pool[rng.gen_range(0..pool.len())]
        })
        .collect()
}

#[test]
fn test_random_strings() {
    let mut rng = StdRng::seed_from_u64(0x636173_65);
    let mut mapper = CaseMapper::new();
    for _ in 0..500 {
        let left = random_string(&mut rng);
        let right = random_string(&mut rng);
        let whole = format!("{left}{right}");

        let upper_whole = mapper.to_upper(&whole).into_owned();
        let upper_left = mapper.to_upper(&left).into_owned();
        let upper_right = mapper.to_upper(&right).into_owned();
        assert_eq!(upper_whole, format!("{upper_left}{upper_right}"));
        assert_eq!(mapper.to_upper(&upper_whole), upper_whole);

        let lower_whole = mapper.to_lower(&whole).into_owned();
        let lower_left = mapper.to_lower(&left).into_owned();
        let lower_right = mapper.to_lower(&right).into_owned();
        assert_eq!(lower_whole, format!("{lower_left}{lower_right}"));
        assert_eq!(mapper.to_lower(&lower_whole), lower_whole);
    }
}
