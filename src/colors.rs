//! Per-run color assignment shared by every chart of the run.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::identity::ToolIdentity;
use crate::palette::{NAMED_COLORS, NamedColor};

// Every tool of a full matrix gets its own color.
const _: () = assert!(NAMED_COLORS.len() >= ToolIdentity::ALL.len());

/// Assigns each identity a random palette color the first time it is seen
/// and hands back the same color on every later lookup.
///
/// Build one per run and pass it to every chart so a tool keeps its color
/// across the encryption, decryption and size charts.
pub struct ColorRegistry {
    palette: Vec<NamedColor>,
    assigned: HashMap<ToolIdentity, NamedColor>,
    rng: StdRng,
    warned_exhausted: bool,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::from_rng(NAMED_COLORS.to_vec(), StdRng::from_entropy())
    }

    /// Reproducible assignment: the same seed yields the same colors.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(NAMED_COLORS.to_vec(), StdRng::seed_from_u64(seed))
    }

    fn from_rng(palette: Vec<NamedColor>, rng: StdRng) -> Self {
        Self {
            palette,
            assigned: HashMap::new(),
            rng,
            warned_exhausted: false,
        }
    }

    pub fn color_for(&mut self, identity: ToolIdentity) -> NamedColor {
        if let Some(color) = self.assigned.get(&identity) {
            return *color;
        }

        let used: HashSet<NamedColor> = self.assigned.values().copied().collect();
        let free: Vec<NamedColor> = self
            .palette
            .iter()
            .filter(|c| !used.contains(c))
            .copied()
            .collect();

        let color = match free.choose(&mut self.rng) {
            Some(color) => *color,
            None => {
                if !self.warned_exhausted {
                    warn!(
                        palette = self.palette.len(),
                        "color palette exhausted; reusing colors across tools"
                    );
                    self.warned_exhausted = true;
                }
                self.palette[self.rng.gen_range(0..self.palette.len())]
            }
        };

        debug!(tool = %identity, color = %color, "assigned color");
        self.assigned.insert(identity, color);
        color
    }

    /// Color already assigned to `identity`, without drawing a new one.
    pub fn get(&self, identity: ToolIdentity) -> Option<NamedColor> {
        self.assigned.get(&identity).copied()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
