use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// The sub-population a district's margin should favor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    /// Favors `count_a` (negative margins).
    A,
    /// Favors `count_b` (positive margins).
    #[default]
    B,
}

impl Party {
    /// Sign of a margin that favors this party.
    #[inline]
    pub fn sign(self) -> i64 {
        match self { Party::A => -1, Party::B => 1 }
    }

    /// Returns true if a district margin strictly favors this party.
    #[inline] pub fn agrees(self, margin: i64) -> bool { margin * self.sign() > 0 }
}

/// Constants that fix a single search run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Number of districts to build.
    pub districts: usize,
    /// Minimum district population.
    pub min_population: i64,
    /// Maximum district population.
    pub max_population: i64,
    /// Party whose margin sign districts should match.
    pub party: Party,
    /// Districts allowed to disagree with `party`; `None` means no limit.
    pub max_disagreements: Option<usize>,
    /// Unit that seeds district 0.
    pub seed_unit: usize,
    /// Stack size of the search thread, in MiB.
    pub stack_size_mb: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            districts: 10,
            min_population: 550_000,
            max_population: 650_000,
            party: Party::B,
            max_disagreements: None,
            seed_unit: 0,
            stack_size_mb: 256,
        }
    }
}

impl SearchConfig {
    /// Read a config from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[SearchConfig::from_json_file] Failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("[SearchConfig::from_json_file] Failed to parse {}", path.display()))
    }

    /// Number of districts allowed to disagree with the target party.
    #[inline]
    pub fn tolerance(&self) -> usize {
        self.max_disagreements.unwrap_or(self.districts)
    }

    /// Check the config against the graph it will be run on.
    pub fn validate(&self, graph: &Graph) -> Result<()> {
        ensure!(self.districts > 0, "[SearchConfig] districts must be at least 1");
        ensure!(self.min_population >= 0, "[SearchConfig] min_population must be non-negative");
        ensure!(
            self.min_population <= self.max_population,
            "[SearchConfig] min_population ({}) exceeds max_population ({})",
            self.min_population, self.max_population
        );
        ensure!(
            self.tolerance() <= self.districts,
            "[SearchConfig] max_disagreements ({}) exceeds districts ({})",
            self.tolerance(), self.districts
        );
        ensure!(graph.node_count() > 0, "[SearchConfig] graph has no units");
        ensure!(
            self.seed_unit < graph.node_count(),
            "[SearchConfig] seed_unit {} out of range for {} units",
            self.seed_unit, graph.node_count()
        );
        ensure!(self.stack_size_mb > 0, "[SearchConfig] stack_size_mb must be positive");
        Ok(())
    }
}
