// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use rand::Rng;

use super::with_thread_rng;

const PET_NAMES: [&str; 12] = [
    "buddy", "max", "bella", "charlie", "lucy", "daisy", "molly", "lola", "sadie",
    "maggie", "bailey", "sophie",
];

const FRUIT_NAMES: [&str; 12] = [
    "apple", "banana", "orange", "pear", "peach", "grape", "kiwi", "mango", "cherry",
    "lemon", "lime", "plum",
];

/// A human readable id like `lucy-mango-042`, eg: for naming temp files and log files.
/// Not unique, just unlikely to collide.
pub fn generate_friendly_random_id() -> String {
    with_thread_rng(|rng| {
        let pet = PET_NAMES[rng.random_range(0..PET_NAMES.len())];
        let fruit = FRUIT_NAMES[rng.random_range(0..FRUIT_NAMES.len())];
        let number: u16 = rng.random_range(0..1000);
        format!("{pet}-{fruit}-{number:03}")
    })
}
