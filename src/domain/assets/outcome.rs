// ============================================================
// OPTIMIZATION OUTCOMES
// ============================================================
// Per-file results and the run-level counters built from them

use std::fmt;

/// What happened to one asset
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationOutcome {
    /// Below the minimum size threshold; no request was made
    TooSmall { original: u64 },

    /// Provider succeeded but removed more than the allowed share of bytes
    TooAggressive { original: u64, reported: u64 },

    /// Compressed bytes were verified but the operator did not confirm the overwrite
    Declined { original: u64, optimized: u64 },

    /// Local file now holds the compressed bytes
    Optimized { original: u64, optimized: u64 },

    /// Remote, transport or integrity failure; local file untouched
    Failed { original: u64, reason: String },
}

impl OptimizationOutcome {
    pub fn original_size(&self) -> u64 {
        match self {
            OptimizationOutcome::TooSmall { original }
            | OptimizationOutcome::TooAggressive { original, .. }
            | OptimizationOutcome::Declined { original, .. }
            | OptimizationOutcome::Optimized { original, .. }
            | OptimizationOutcome::Failed { original, .. } => *original,
        }
    }

    /// Size of the local file once the outcome has been applied
    pub fn resulting_size(&self) -> u64 {
        match self {
            OptimizationOutcome::Optimized { optimized, .. } => *optimized,
            other => other.original_size(),
        }
    }

    pub fn is_optimized(&self) -> bool {
        matches!(self, OptimizationOutcome::Optimized { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OptimizationOutcome::Failed { .. })
    }
}

impl fmt::Display for OptimizationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationOutcome::TooSmall { .. } => write!(f, "unchanged-too-small"),
            OptimizationOutcome::TooAggressive { .. } => write!(f, "unchanged-too-aggressive"),
            OptimizationOutcome::Declined { .. } => write!(f, "unchanged-declined"),
            OptimizationOutcome::Optimized { .. } => write!(f, "optimized"),
            OptimizationOutcome::Failed { .. } => write!(f, "failed"),
        }
    }
}

/// Counters accumulated by the sequential run loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub optimized: usize,
    pub too_small: usize,
    pub too_aggressive: usize,
    pub declined: usize,
    pub failed: usize,

    /// Bytes before, across every file that did not fail
    pub total_original: u64,

    /// Bytes after, across every file that did not fail
    pub total_final: u64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &OptimizationOutcome) {
        match outcome {
            OptimizationOutcome::TooSmall { .. } => self.too_small += 1,
            OptimizationOutcome::TooAggressive { .. } => self.too_aggressive += 1,
            OptimizationOutcome::Declined { .. } => self.declined += 1,
            OptimizationOutcome::Optimized { .. } => self.optimized += 1,
            OptimizationOutcome::Failed { .. } => {
                self.failed += 1;
                return;
            }
        }
        self.total_original += outcome.original_size();
        self.total_final += outcome.resulting_size();
    }

    pub fn skipped(&self) -> usize {
        self.too_small + self.too_aggressive + self.declined
    }

    pub fn processed(&self) -> usize {
        self.optimized + self.skipped() + self.failed
    }

    pub fn saved_bytes(&self) -> u64 {
        self.total_original.saturating_sub(self.total_final)
    }

    pub fn saved_percent(&self) -> f64 {
        if self.total_original == 0 {
            return 0.0;
        }
        self.saved_bytes() as f64 / self.total_original as f64 * 100.0
    }
}
