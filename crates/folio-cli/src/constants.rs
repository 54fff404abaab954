//! Sample-data pools and bounds for the simulation driver.

/// Categories a generated record may carry.
pub const CATEGORIES: &[&str] =
    &["Fiction", "Non-Fiction", "Science", "History", "Technology", "Biography"];

/// Author pool for generated records.
pub const AUTHORS: &[&str] = &[
    "Isaac Asimov",
    "Arthur C. Clarke",
    "Stephen Hawking",
    "Carl Sagan",
    "Richard Feynman",
    "Douglas Hofstadter",
    "Alan Turing",
    "Ada Lovelace",
];

/// Title pool for generated records.
pub const TITLES: &[&str] = &[
    "Foundation",
    "Odyssey",
    "Cosmos",
    "Elegant Universe",
    "Surely You're Joking",
    "Gödel, Escher, Bach",
    "The Turing Test",
    "Computing Machinery and Intelligence",
];

/// Publication year bounds for generated records.
pub const MIN_YEAR: i32 = 1950;
pub const MAX_YEAR: i32 = 2024;

/// First key number handed out by the generator; numbers below it are
/// reserved for the fixed seed records and for deliberately-unknown
/// lookup probes.
pub const FIRST_GENERATED_KEY: u64 = 1000;

/// Default number of simulation steps.
pub const DEFAULT_STEPS: u64 = 20;
