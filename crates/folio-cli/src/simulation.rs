//! Random-event simulation driver.
//!
//! Drives a [`Catalog`] through a randomized stream of mutation and query
//! events, one per step, logging each outcome. The driver is the engine's
//! reference consumer: it talks to the catalog exclusively through its
//! public API, and it removes records only via materialised key snapshots —
//! never through a live iteration handle.

use crate::constants::{
    AUTHORS, CATEGORIES, FIRST_GENERATED_KEY, MAX_YEAR, MIN_YEAR, TITLES,
};
use anyhow::{Result, ensure};
use folio_core::{Catalog, CatalogStats, Record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Event kinds the driver chooses between, uniformly at random.
#[derive(Debug, Clone, Copy)]
enum Event {
    AddRecord,
    RemoveRandomRecord,
    SearchByAuthor,
    SearchByYear,
    SearchUnknownKey,
    SearchByCategory,
}

impl Event {
    const ALL: [Event; 6] = [
        Event::AddRecord,
        Event::RemoveRandomRecord,
        Event::SearchByAuthor,
        Event::SearchByYear,
        Event::SearchUnknownKey,
        Event::SearchByCategory,
    ];
}

/// Step-by-step random driver over a catalog.
pub struct Simulator {
    catalog: Catalog,
    rng: StdRng,
    step: u64,
    key_counter: u64,
}

impl Simulator {
    /// Create a driver over `catalog`, seeded for reproducibility when
    /// `seed` is given.
    pub fn new(catalog: Catalog, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                info!(seed, "simulation seeded");
                StdRng::seed_from_u64(seed)
            }
            None => {
                info!("simulation running with entropy seed");
                StdRng::from_entropy()
            }
        };
        Self { catalog, rng, step: 0, key_counter: FIRST_GENERATED_KEY }
    }

    /// Read-only access to the driven catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Execute one random event and return its printable outcome line.
    pub fn run_step(&mut self) -> Result<String> {
        self.step += 1;
        let event = Event::ALL[self.rng.gen_range(0..Event::ALL.len())];
        let outcome = match event {
            Event::AddRecord => self.event_add_record()?,
            Event::RemoveRandomRecord => self.event_remove_random_record()?,
            Event::SearchByAuthor => self.event_search_by_author(),
            Event::SearchByYear => self.event_search_by_year(),
            Event::SearchUnknownKey => self.event_search_unknown_key(),
            Event::SearchByCategory => self.event_search_by_category(),
        };

        if cfg!(debug_assertions) {
            self.catalog.verify_integrity()?;
        }

        let line = format!("[Step {}] {}", self.step, outcome);
        info!(step = self.step, event = ?event, "{outcome}");
        Ok(line)
    }

    /// Run `steps` events and return the final statistics.
    pub fn run(&mut self, steps: u64) -> Result<CatalogStats> {
        println!();
        println!("{}", "=".repeat(70));
        println!("CATALOG SIMULATION: {steps} steps");
        println!("{}", "=".repeat(70));
        println!();

        for _ in 0..steps {
            let line = self.run_step()?;
            println!("{line}");
        }

        info!(steps, final_size = self.catalog.len(), "simulation completed");
        Ok(self.catalog.statistics())
    }

    fn next_key(&mut self) -> String {
        let key = format!("KEY-{:06}", self.key_counter);
        self.key_counter += 1;
        key
    }

    fn random_record(&mut self) -> Record {
        let title = TITLES[self.rng.gen_range(0..TITLES.len())];
        let author = AUTHORS[self.rng.gen_range(0..AUTHORS.len())];
        let year = self.rng.gen_range(MIN_YEAR..=MAX_YEAR);
        let category = CATEGORIES[self.rng.gen_range(0..CATEGORIES.len())];
        let key = self.next_key();
        Record::new(title, author, year, category, key)
    }

    fn event_add_record(&mut self) -> Result<String> {
        let record = self.random_record();
        let description = record.to_string();
        self.catalog.add_record(record)?;
        Ok(format!("Added new record: {description}"))
    }

    fn event_remove_random_record(&mut self) -> Result<String> {
        if self.catalog.is_empty() {
            return Ok("Cannot remove: catalog is empty".to_string());
        }

        // Snapshot first, mutate after: candidates are picked from an owned
        // key list, not from a live iteration over the collection.
        let keys = self.catalog.keys();
        let key = keys[self.rng.gen_range(0..keys.len())].clone();
        let description = self
            .catalog
            .find_by_key(&key)
            .map(ToString::to_string)
            .unwrap_or_else(|| key.clone());

        let removed = self.catalog.remove_record(&key)?;
        ensure!(removed, "snapshot key {key} vanished before removal");
        Ok(format!("Removed record: {description}"))
    }

    fn event_search_by_author(&mut self) -> String {
        let author = AUTHORS[self.rng.gen_range(0..AUTHORS.len())];
        let count = self.catalog.find_by_author(author).len();
        format!("Search by author '{author}': found {count} record(s)")
    }

    fn event_search_by_year(&mut self) -> String {
        let year = self.rng.gen_range(MIN_YEAR..=MAX_YEAR);
        let count = self.catalog.find_by_year(year).len();
        format!("Search by year {year}: found {count} record(s)")
    }

    fn event_search_unknown_key(&mut self) -> String {
        // Probe below the generator's range; only the fixed seed records
        // can ever answer.
        let key = format!("KEY-{:06}", self.rng.gen_range(1..FIRST_GENERATED_KEY));
        match self.catalog.find_by_key(&key) {
            None => format!("Search by key '{key}': not found (expected)"),
            Some(record) => format!("Search by key '{key}': found {record}"),
        }
    }

    fn event_search_by_category(&mut self) -> String {
        let category = CATEGORIES[self.rng.gen_range(0..CATEGORIES.len())];
        let count = self.catalog.find_by_category(category).len();
        format!("Search by category '{category}': found {count} record(s)")
    }
}

/// Build the initial catalog with its fixed seed records.
pub fn seed_catalog(name: &str) -> Result<Catalog> {
    let mut catalog = Catalog::new(name);
    let initial = [
        Record::new("Foundation", "Isaac Asimov", 1951, "Science", "KEY-000001"),
        Record::new("Cosmos", "Carl Sagan", 1980, "Science", "KEY-000002"),
        Record::new("2001: A Space Odyssey", "Arthur C. Clarke", 1968, "Fiction", "KEY-000003"),
    ];
    for record in initial {
        catalog.add_record(record)?;
    }
    Ok(catalog)
}
