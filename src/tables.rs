//! Embedded case-mapping programs.
//!
//! Generated from the Unicode 14.0.0 character database; do not edit by
//! hand. `TO_UPPER` and `TO_LOWER` carry the single-code-point mappings.
//! `SUFFIX_1`/`SUFFIX_2`/`SUFFIX_3` carry the 1st/2nd/3rd code points of
//! multi-character upper-case expansions, keyed by the same source code
//! point ("ß" appears in `SUFFIX_1` and `SUFFIX_2`, mapping to "SS").
//!
//! The upper-direction programs (`TO_UPPER` and the suffixes) are
//! interpreted with [`Direction::Upper`](crate::bytecode::Direction),
//! `TO_LOWER` with `Direction::Lower`.

pub static TO_UPPER: &[u8] = &[
    0x01, 0xa1, 0x1a, 0x45, 0xba, 0x0e, 0xdc, 0x62, 0xaa, 0x17, 0x45, 0x81,
    0x07, 0x45, 0x80, 0x05, 0xf8, 0x62, 0x81, 0x18, 0x48, 0x80, 0x01, 0xc9,
    0x62, 0x81, 0x03, 0x48, 0x81, 0x08, 0x48, 0x81, 0x17, 0x48, 0x81, 0x02,
    0x48, 0x80, 0x40, 0x80, 0x01, 0xd3, 0x62, 0x80, 0x09, 0xc3, 0x62, 0x82,
    0x02, 0x48, 0x81, 0x02, 0x58, 0x82, 0x40, 0x82, 0x07, 0xf6, 0x62, 0x83,
    0x40, 0x80, 0x08, 0xfd, 0x62, 0x83, 0x08, 0xe0, 0x62, 0x82, 0x03, 0x48,
    0x81, 0x40, 0x84, 0x02, 0x50, 0x81, 0x02, 0x48, 0x81, 0x40, 0x83, 0x40,
    0x81, 0x07, 0xf7, 0x62, 0x85, 0x07, 0xc4, 0x02, 0x62, 0x81, 0x07, 0xc7,
    0x02, 0x62, 0x81, 0x07, 0xca, 0x02, 0x62, 0x81, 0x07, 0x48, 0x80, 0x40,
    0x80, 0x06, 0xce, 0x62, 0x81, 0x09, 0x48, 0x81, 0x07, 0xf1, 0x02, 0x62,
    0x81, 0x40, 0x83, 0x14, 0x48, 0x82, 0x09, 0x48, 0x87, 0x40, 0x82, 0x02,
    0x31, 0xfd, 0x02, 0x63, 0x81, 0x40, 0x84, 0x04, 0x48, 0x80, 0x40, 0x80,
    0x02, 0x31, 0xf1, 0x02, 0x60, 0x80, 0x65, 0x80, 0x05, 0xfc, 0x02, 0x67,
    0x81, 0x06, 0xc8, 0x02, 0x63, 0x81, 0x67, 0x81, 0x63, 0x80, 0x0a, 0x1e,
    0xeb, 0x62, 0x83, 0x06, 0xd3, 0x62, 0x80, 0x0a, 0x1e, 0xec, 0x62, 0x81,
    0x06, 0xd4, 0x62, 0x81, 0x0a, 0x1e, 0xcd, 0x62, 0x80, 0x0a, 0x1e, 0xea,
    0x62, 0x81, 0x06, 0xd8, 0x02, 0x61, 0x80, 0x0a, 0x1e, 0xee, 0x62, 0x80,
    0x02, 0x31, 0xe2, 0x62, 0x80, 0x0a, 0x1e, 0xed, 0x62, 0x82, 0x06, 0xdc,
    0x62, 0x81, 0x02, 0x31, 0xee, 0x62, 0x80, 0x06, 0xdb, 0x02, 0x74, 0x85,
    0x02, 0x31, 0xe4, 0x62, 0x82, 0x06, 0xe6, 0x62, 0x81, 0x0a, 0x1f, 0xc5,
    0x62, 0x80, 0x06, 0xe9, 0x62, 0x83, 0x0a, 0x1e, 0xf1, 0x62, 0x80, 0x06,
    0xee, 0x62, 0x80, 0x09, 0xc4, 0x62, 0x80, 0x06, 0xf0, 0x02, 0x63, 0x80,
    0x09, 0xc5, 0x62, 0x85, 0x06, 0xf7, 0x62, 0x8a, 0x0a, 0x1e, 0xf4, 0x02,
    0x60, 0x02, 0xa6, 0x0e, 0xd9, 0x62, 0xab, 0x02, 0x48, 0x82, 0x40, 0x83,
    0x0f, 0xfc, 0x03, 0x63, 0xae, 0x0e, 0xc4, 0x02, 0x64, 0x80, 0x02, 0x63,
    0x81, 0x11, 0x45, 0x80, 0x0e, 0xe3, 0x02, 0x62, 0x80, 0x08, 0x45, 0x80,
    0x0e, 0xca, 0x02, 0x64, 0x80, 0x63, 0x81, 0x65, 0x80, 0x0e, 0xd8, 0x62,
    0x83, 0x0e, 0xe6, 0x62, 0x80, 0x0e, 0xe0, 0x62, 0x80, 0x42, 0x81, 0x0b,
    0x48, 0x80, 0x40, 0x80, 0x0e, 0xda, 0x62, 0x80, 0x47, 0x80, 0x0f, 0xf9,
    0x62, 0x80, 0x0d, 0xff, 0x62, 0x81, 0x0e, 0xd5, 0x62, 0x82, 0x02, 0x50,
    0xb2, 0x20, 0x45, 0x80, 0x10, 0x47, 0x81, 0x11, 0x48, 0x88, 0x1b, 0x48,
    0x81, 0x06, 0x48, 0x80, 0x40, 0x80, 0x13, 0xc0, 0x62, 0x81, 0x30, 0x48,
    0xb0, 0x26, 0x46, 0x2d, 0x89, 0x01, 0x32, 0xcf, 0x2b, 0x63, 0x82, 0x01,
    0x32, 0xfc, 0x03, 0x63, 0x0b, 0xb8, 0x06, 0x42, 0x22, 0x82, 0x10, 0xd0,
    0x02, 0x64, 0x80, 0x10, 0xdb, 0x02, 0x65, 0x80, 0x10, 0xe2, 0x02, 0x62,
    0x80, 0x10, 0xea, 0x62, 0x80, 0x11, 0xe2, 0x62, 0x80, 0x0a, 0x19, 0xca,
    0x62, 0x03, 0xb0, 0x0a, 0x1d, 0xfd, 0x62, 0x83, 0x02, 0x31, 0xe3, 0x62,
    0x90, 0x0a, 0x1f, 0xc6, 0x62, 0x01, 0xb2, 0x01, 0x0b, 0x48, 0x84, 0x01,
    0x39, 0xe0, 0x62, 0x85, 0x2f, 0x48, 0x80, 0x40, 0x80, 0x01, 0x3c, 0xc7,
    0x08, 0x63, 0x88, 0x01, 0x3c, 0xd7, 0x06, 0x63, 0x8a, 0x01, 0x3c, 0xe7,
    0x08, 0x63, 0x88, 0x01, 0x3c, 0xf7, 0x08, 0x63, 0x88, 0x01, 0x3d, 0xc7,
    0x06, 0x63, 0x8b, 0x01, 0x3d, 0xd7, 0x04, 0x6c, 0x87, 0x01, 0x3d, 0xe7,
    0x08, 0x63, 0x88, 0x01, 0x3e, 0xf9, 0x02, 0x63, 0x80, 0x01, 0x3f, 0xc7,
    0x04, 0x63, 0x80, 0x01, 0x3f, 0xd9, 0x02, 0x63, 0x80, 0x01, 0x3f, 0xf7,
    0x02, 0x63, 0x80, 0x01, 0x3f, 0xe9, 0x02, 0x63, 0x80, 0x01, 0x3f, 0xf9,
    0x02, 0x63, 0x82, 0x01, 0x3e, 0xc7, 0x08, 0x63, 0x88, 0x01, 0x3e, 0xd7,
    0x08, 0x63, 0x88, 0x01, 0x3e, 0xe7, 0x08, 0x63, 0x88, 0x01, 0x3e, 0xf7,
    0x02, 0x63, 0x81, 0x65, 0x8a, 0x0e, 0xd9, 0x62, 0x84, 0x01, 0x3f, 0xcc,
    0x62, 0x8c, 0x01, 0x3f, 0xd7, 0x02, 0x63, 0x8e, 0x01, 0x3f, 0xe7, 0x02,
    0x63, 0x83, 0x65, 0x8d, 0x01, 0x3f, 0xfc, 0x62, 0x05, 0x9a, 0x02, 0x04,
    0xf2, 0x62, 0xa1, 0x10, 0x43, 0x84, 0x40, 0x0d, 0x8b, 0x1a, 0x44, 0x1d,
    0x86, 0x30, 0x46, 0x81, 0x40, 0x83, 0x08, 0xf6, 0x02, 0x66, 0x81, 0x03,
    0x48, 0x85, 0x02, 0x50, 0x88, 0x32, 0x48, 0x87, 0x02, 0x48, 0x83, 0x40,
    0x8c, 0x01, 0x02, 0xdf, 0x26, 0x63, 0x81, 0x64, 0x85, 0x01, 0x03, 0xcd,
    0x62, 0x07, 0x24, 0x93, 0x17, 0x48, 0x92, 0x0e, 0x48, 0x02, 0x86, 0x07,
    0x48, 0x82, 0x1f, 0x48, 0x89, 0x02, 0x48, 0x81, 0x05, 0x48, 0x83, 0x40,
    0x84, 0x40, 0x81, 0x40, 0x80, 0x0a, 0x1f, 0xc4, 0x62, 0x82, 0x0a, 0x48,
    0x8a, 0x08, 0x48, 0x83, 0x02, 0x48, 0x85, 0x40, 0x85, 0x02, 0x48, 0x9b,
    0x40, 0x0d, 0x9c, 0x0a, 0x1e, 0xf3, 0x62, 0x9c, 0x01, 0x0e, 0xdf, 0x01,
    0x10, 0x63, 0x05, 0x0e, 0x81, 0x1a, 0x45, 0x13, 0x8d, 0x10, 0x0f, 0xff,
    0x28, 0x63, 0x02, 0x88, 0x10, 0x12, 0xef, 0x24, 0x63, 0x02, 0x9b, 0x10,
    0x15, 0xef, 0x0b, 0x63, 0x81, 0x10, 0x15, 0xfb, 0x0f, 0x63, 0x81, 0x10,
    0x16, 0xcb, 0x07, 0x63, 0x81, 0x10, 0x16, 0xd3, 0x02, 0x63, 0x1c, 0x83,
    0x10, 0x31, 0xff, 0x33, 0x63, 0x2f, 0x8d, 0x20, 0x45, 0x05, 0x16, 0x80,
    0x20, 0x45, 0x07, 0x2a, 0xa2, 0x1e, 0x23, 0xff, 0x22, 0x63,
];

pub static SUFFIX_1: &[u8] = &[
    0x03, 0x9f, 0x01, 0xd3, 0x62, 0x01, 0xa9, 0x0a, 0xfc, 0x62, 0x02, 0xa6,
    0x01, 0xca, 0x62, 0x06, 0x9f, 0x0e, 0xd9, 0x62, 0x9f, 0x0e, 0xe5, 0x62,
    0x07, 0x96, 0x14, 0xf5, 0x62, 0x01, 0x24, 0x8e, 0x01, 0xc8, 0x62, 0x80,
    0x01, 0xd1, 0x02, 0x65, 0x80, 0x64, 0x80, 0x01, 0xc1, 0x62, 0x02, 0xb5,
    0x0e, 0xe5, 0x04, 0x6a, 0xa8, 0x01, 0x3c, 0xc7, 0x08, 0x63, 0x80, 0x01,
    0x3c, 0xc7, 0x08, 0x63, 0x80, 0x01, 0x3c, 0xe7, 0x08, 0x63, 0x80, 0x01,
    0x3c, 0xe7, 0x08, 0x63, 0x80, 0x01, 0x3d, 0xe7, 0x08, 0x63, 0x80, 0x01,
    0x3d, 0xe7, 0x08, 0x63, 0x82, 0x01, 0x3e, 0xfa, 0x62, 0x80, 0x0e, 0xd1,
    0x62, 0x80, 0x0e, 0xc6, 0x62, 0x81, 0x0e, 0xd1, 0x02, 0x62, 0x84, 0x62,
    0x85, 0x01, 0x3f, 0xca, 0x62, 0x80, 0x0e, 0xd7, 0x62, 0x80, 0x0e, 0xc9,
    0x62, 0x81, 0x0e, 0xd7, 0x02, 0x62, 0x84, 0x62, 0x85, 0x0e, 0xd9, 0x02,
    0x62, 0x82, 0x02, 0x62, 0x8a, 0x0e, 0xe5, 0x02, 0x62, 0x80, 0x0e, 0xe1,
    0x62, 0x81, 0x0e, 0xe5, 0x02, 0x62, 0x8a, 0x01, 0x3f, 0xfa, 0x62, 0x80,
    0x0e, 0xe9, 0x62, 0x80, 0x0e, 0xcf, 0x62, 0x81, 0x0e, 0xe9, 0x02, 0x62,
    0x84, 0x62, 0x0d, 0x2c, 0x83, 0x01, 0xc6, 0x05, 0x62, 0x80, 0x01, 0xd3,
    0x02, 0x62, 0x8c, 0x15, 0xc4, 0x03, 0x62, 0x80, 0x15, 0xce, 0x62, 0x80,
    0x15, 0xc4, 0x62,
];

pub static SUFFIX_2: &[u8] = &[
    0x03, 0x9f, 0x01, 0xd3, 0x62, 0x01, 0xa9, 0x01, 0xce, 0x62, 0x02, 0xa6,
    0x0c, 0xcc, 0x62, 0x06, 0x9f, 0x0c, 0xc8, 0x62, 0x9f, 0x62, 0x07, 0x96,
    0x15, 0xd2, 0x62, 0x01, 0x24, 0x8e, 0x0c, 0xf1, 0x62, 0x80, 0x0c, 0xc6,
    0x02, 0x64, 0x80, 0x62, 0x80, 0x0a, 0xfe, 0x62, 0x02, 0xb5, 0x0c, 0xd3,
    0x04, 0x6a, 0xa8, 0x0e, 0xd9, 0x30, 0x62, 0x82, 0x03, 0x62, 0x81, 0x0d,
    0xc2, 0x02, 0x62, 0x84, 0x0e, 0xd9, 0x62, 0x85, 0x03, 0x62, 0x81, 0x0d,
    0xc2, 0x02, 0x62, 0x84, 0x0e, 0xd9, 0x62, 0x85, 0x0c, 0xc8, 0x02, 0x62,
    0x82, 0x0d, 0xc2, 0x62, 0x80, 0x0c, 0xc8, 0x62, 0x8a, 0x02, 0x62, 0x80,
    0x0c, 0xd3, 0x62, 0x81, 0x0d, 0xc2, 0x62, 0x80, 0x0c, 0xc8, 0x62, 0x8a,
    0x0e, 0xd9, 0x03, 0x62, 0x81, 0x0d, 0xc2, 0x02, 0x62, 0x84, 0x0e, 0xd9,
    0x62, 0x0d, 0x2c, 0x83, 0x01, 0xc3, 0x03, 0x65, 0x80, 0x01, 0xc6, 0x02,
    0x62, 0x80, 0x01, 0xd4, 0x02, 0x62, 0x8c, 0x15, 0xc6, 0x62, 0x80, 0x14,
    0xf5, 0x62, 0x80, 0x14, 0xfb, 0x62, 0x80, 0x15, 0xc6, 0x62, 0x80, 0x14,
    0xfd, 0x62,
];

pub static SUFFIX_3: &[u8] = &[
    0x0e, 0x90, 0x0c, 0xc1, 0x62, 0x9f, 0x62, 0x01, 0x2e, 0xa1, 0x0b, 0xff,
    0x02, 0x6b, 0x80, 0x0d, 0xc2, 0x62, 0x01, 0xa0, 0x0e, 0xd9, 0x62, 0x8f,
    0x62, 0x8a, 0x0b, 0xff, 0x02, 0x63, 0x83, 0x0d, 0xc2, 0x62, 0x8a, 0x0b,
    0xff, 0x02, 0x63, 0x83, 0x0d, 0xc2, 0x62, 0x8f, 0x0e, 0xd9, 0x62, 0x0d,
    0x2c, 0x8b, 0x01, 0xc6, 0x02, 0x65,
];

pub static TO_LOWER: &[u8] = &[
    0x01, 0x81, 0x1a, 0x45, 0x01, 0xa5, 0x17, 0x45, 0x81, 0x07, 0x45, 0xa1,
    0x18, 0x48, 0x80, 0x01, 0xe9, 0x62, 0x81, 0x03, 0x48, 0x81, 0x08, 0x48,
    0x81, 0x17, 0x48, 0x80, 0x03, 0xff, 0x62, 0x80, 0x03, 0x48, 0x82, 0x09,
    0xd3, 0x62, 0x80, 0x02, 0x48, 0x80, 0x63, 0x80, 0x40, 0x81, 0x09, 0xd5,
    0x02, 0x63, 0x80, 0x40, 0x82, 0x07, 0xdd, 0x62, 0x80, 0x09, 0xd7, 0x02,
    0x64, 0x80, 0x40, 0x81, 0x09, 0xdd, 0x02, 0x65, 0x81, 0x09, 0xea, 0x02,
    0x61, 0x80, 0x40, 0x83, 0x09, 0xec, 0x02, 0x65, 0x81, 0x65, 0x80, 0x03,
    0x48, 0x80, 0x0a, 0xc0, 0x62, 0x80, 0x40, 0x81, 0x65, 0x82, 0x40, 0x81,
    0x67, 0x80, 0x40, 0x81, 0x0a, 0xc9, 0x02, 0x63, 0x80, 0x02, 0x48, 0x80,
    0x0a, 0xd2, 0x62, 0x80, 0x02, 0x58, 0x84, 0x07, 0xc6, 0x02, 0x62, 0x81,
    0x07, 0xc9, 0x02, 0x62, 0x81, 0x07, 0xcc, 0x02, 0x62, 0x81, 0x08, 0x48,
    0x81, 0x09, 0x48, 0x81, 0x07, 0xf3, 0x02, 0x62, 0x81, 0x40, 0x81, 0x06,
    0xd5, 0x62, 0x80, 0x06, 0xff, 0x62, 0x80, 0x14, 0x48, 0x80, 0x06, 0xde,
    0x62, 0x81, 0x09, 0x48, 0x86, 0x02, 0x31, 0xe5, 0x62, 0x80, 0x40, 0x81,
    0x06, 0xda, 0x62, 0x80, 0x02, 0x31, 0xe6, 0x62, 0x82, 0x40, 0x81, 0x06,
    0xc0, 0x62, 0x80, 0x0a, 0xc6, 0x02, 0x65, 0x80, 0x05, 0x48, 0x04, 0xa0,
    0x02, 0x48, 0x82, 0x40, 0x88, 0x0f, 0xf3, 0x62, 0x86, 0x0e, 0xec, 0x62,
    0x81, 0x03, 0x63, 0x81, 0x0f, 0xcc, 0x62, 0x81, 0x02, 0x63, 0x81, 0x11,
    0x45, 0x81, 0x09, 0x45, 0xa3, 0x42, 0x88, 0x0c, 0x48, 0x84, 0x0e, 0xf8,
    0x62, 0x82, 0x40, 0x81, 0x0f, 0xf2, 0x62, 0x80, 0x40, 0x82, 0x0d, 0xfa,
    0x03, 0x63, 0x80, 0x10, 0x47, 0x80, 0x20, 0x45, 0xb0, 0x11, 0x48, 0x88,
    0x1b, 0x48, 0x80, 0x13, 0xcf, 0x62, 0x80, 0x07, 0x48, 0x81, 0x30, 0x48,
    0x81, 0x26, 0x46, 0x2d, 0x89, 0x02, 0x33, 0xff, 0x26, 0x63, 0x81, 0x64,
    0x85, 0x02, 0x34, 0xed, 0x62, 0x0b, 0x92, 0x0a, 0x2d, 0xef, 0x01, 0x10,
    0x63, 0x80, 0x06, 0x42, 0x22, 0x9a, 0x01, 0x03, 0xcf, 0x2b, 0x63, 0x82,
    0x01, 0x03, 0xfc, 0x03, 0x63, 0x05, 0x80, 0x01, 0x0b, 0x48, 0x88, 0x03,
    0xdf, 0x62, 0x81, 0x30, 0x48, 0x88, 0x01, 0x3b, 0xff, 0x08, 0x63, 0x88,
    0x01, 0x3c, 0xcf, 0x06, 0x63, 0x8a, 0x01, 0x3c, 0xdf, 0x08, 0x63, 0x88,
    0x01, 0x3c, 0xef, 0x08, 0x63, 0x88, 0x01, 0x3c, 0xff, 0x06, 0x63, 0x8b,
    0x01, 0x3d, 0xcf, 0x04, 0x6c, 0x87, 0x01, 0x3d, 0xdf, 0x08, 0x63, 0x98,
    0x01, 0x3d, 0xff, 0x08, 0x63, 0x88, 0x01, 0x3e, 0xcf, 0x08, 0x63, 0x88,
    0x01, 0x3e, 0xdf, 0x08, 0x63, 0x88, 0x01, 0x3e, 0xef, 0x02, 0x63, 0x80,
    0x01, 0x3d, 0xef, 0x02, 0x63, 0x80, 0x01, 0x3e, 0xf3, 0x62, 0x8b, 0x01,
    0x3d, 0xf1, 0x04, 0x63, 0x80, 0x01, 0x3f, 0xc3, 0x62, 0x8b, 0x01, 0x3f,
    0xcf, 0x02, 0x63, 0x80, 0x01, 0x3d, 0xf5, 0x02, 0x63, 0x8c, 0x01, 0x3f,
    0xdf, 0x02, 0x63, 0x80, 0x01, 0x3d, 0xf9, 0x02, 0x63, 0x80, 0x01, 0x3f,
    0xe5, 0x62, 0x8b, 0x01, 0x3d, 0xf7, 0x02, 0x63, 0x80, 0x01, 0x3d, 0xfb,
    0x02, 0x63, 0x80, 0x01, 0x3f, 0xf3, 0x62, 0x04, 0xa9, 0x0f, 0xc9, 0x62,
    0x83, 0x01, 0xeb, 0x62, 0x80, 0x03, 0xe5, 0x62, 0x86, 0x02, 0x05, 0xce,
    0x62, 0xad, 0x10, 0x43, 0x93, 0x40, 0x0c, 0xb2, 0x1a, 0x44, 0x1c, 0xb0,
    0x30, 0x46, 0xb0, 0x40, 0x81, 0x09, 0xeb, 0x62, 0x80, 0x01, 0x35, 0xfd,
    0x62, 0x80, 0x09, 0xfd, 0x62, 0x82, 0x03, 0x48, 0x80, 0x09, 0xd1, 0x62,
    0x80, 0x09, 0xf1, 0x62, 0x80, 0x09, 0xce, 0x02, 0x64, 0x81, 0x02, 0x50,
    0x86, 0x08, 0xfe, 0x02, 0x63, 0x80, 0x32, 0x48, 0x87, 0x02, 0x48, 0x83,
    0x40, 0x07, 0x25, 0x8d, 0x17, 0x48, 0x92, 0x0e, 0x48, 0x02, 0x86, 0x07,
    0x48, 0x82, 0x1f, 0x48, 0x89, 0x02, 0x48, 0x80, 0x01, 0x35, 0xf9, 0x62,
    0x80, 0x05, 0x48, 0x83, 0x40, 0x81, 0x09, 0xe5, 0x62, 0x82, 0x02, 0x48,
    0x82, 0x0a, 0x48, 0x80, 0x63, 0x80, 0x09, 0xd7, 0x02, 0x67, 0x80, 0x09,
    0xee, 0x02, 0x60, 0x81, 0x0a, 0xde, 0x62, 0x80, 0x0a, 0xc7, 0x62, 0x80,
    0x0a, 0xdd, 0x62, 0x80, 0x0a, 0x2d, 0xd3, 0x62, 0x80, 0x08, 0x48, 0x80,
    0x0a, 0x1e, 0xd4, 0x62, 0x80, 0x0a, 0xc2, 0x62, 0x80, 0x01, 0x36, 0xce,
    0x62, 0x80, 0x02, 0x48, 0x85, 0x40, 0x85, 0x02, 0x48, 0x9b, 0x40, 0x05,
    0x1c, 0xab, 0x1a, 0x45, 0x13, 0x85, 0x10, 0x10, 0xe7, 0x28, 0x63, 0x02,
    0x88, 0x10, 0x13, 0xd7, 0x24, 0x63, 0x02, 0x9c, 0x10, 0x16, 0xd6, 0x0b,
    0x63, 0x81, 0x10, 0x16, 0xe2, 0x0f, 0x63, 0x81, 0x10, 0x16, 0xf2, 0x07,
    0x63, 0x81, 0x10, 0x16, 0xfa, 0x02, 0x63, 0x1b, 0xaa, 0x10, 0x32, 0xff,
    0x33, 0x63, 0x2f, 0xad, 0x20, 0x45, 0x05, 0x16, 0x80, 0x20, 0x45, 0x07,
    0x2a, 0xa0, 0x1e, 0x24, 0xe1, 0x22, 0x63,
];

