//! Image Optimization Policy
//!
//! One policy, parameterized by `OptimizerConfig`, shared by every
//! invocation mode:
//! - skip files under the minimum size without calling the provider
//! - reject compressions that remove more than the allowed share of bytes
//! - download, verify the byte count against the reported size, then overwrite
//! - optionally gate the overwrite on operator confirmation
//!
//! Remote, transport and integrity failures end only the current file.
//! Local I/O failures abort the run.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::assets::{ImageAsset, OptimizationOutcome, OptimizerConfig, RunSummary};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::compression::CompressionClient;
use crate::infrastructure::storage;

/// Decides whether a verified compression may replace the local file
pub trait WriteConfirmation: Send + Sync {
    fn confirm_overwrite(&self, asset: &ImageAsset, optimized_size: u64) -> bool;
}

/// Approves every overwrite
pub struct AutoApprove;

impl WriteConfirmation for AutoApprove {
    fn confirm_overwrite(&self, _asset: &ImageAsset, _optimized_size: u64) -> bool {
        true
    }
}

/// Share of the original bytes removed by compression, in percent
pub fn reduction_percent(original: u64, reported: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - reported as f64) / original as f64 * 100.0
}

pub struct ImageOptimizer {
    client: Arc<dyn CompressionClient + Send + Sync>,
    confirmation: Arc<dyn WriteConfirmation>,
    config: OptimizerConfig,
}

impl ImageOptimizer {
    pub fn new(client: Arc<dyn CompressionClient + Send + Sync>, config: OptimizerConfig) -> Self {
        Self {
            client,
            confirmation: Arc::new(AutoApprove),
            config,
        }
    }

    pub fn with_confirmation(mut self, confirmation: Arc<dyn WriteConfirmation>) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Apply the policy to one asset
    pub async fn optimize(&self, asset: &ImageAsset) -> Result<OptimizationOutcome> {
        let name = asset.file_name();

        if asset.size < self.config.min_size_bytes {
            info!(file = %name, size = asset.size, min = self.config.min_size_bytes, "Below minimum size, skipping");
            return Ok(OptimizationOutcome::TooSmall {
                original: asset.size,
            });
        }

        let image = storage::read_bytes(asset.path())?;
        let original = image.len() as u64;

        let compressed = match self.client.shrink(image).await {
            Ok(result) => result,
            Err(err) => return self.per_file_failure(&name, original, err),
        };
        info!(
            file = %name,
            original,
            reported = compressed.size,
            compression_count = compressed.compression_count.as_deref().unwrap_or("unknown"),
            "Provider compressed image"
        );

        let reduction = reduction_percent(original, compressed.size);
        if let Some(max) = self.config.max_reduction_percent {
            if reduction > max {
                info!(file = %name, reduction, max, "Reduction too aggressive, keeping original");
                return Ok(OptimizationOutcome::TooAggressive {
                    original,
                    reported: compressed.size,
                });
            }
        }

        let optimized = match self.client.fetch(&compressed.location).await {
            Ok(bytes) => bytes,
            Err(err) => return self.per_file_failure(&name, original, err),
        };

        let actual = optimized.len() as u64;
        if actual != compressed.size {
            let err = AppError::IntegrityError {
                expected: compressed.size,
                actual,
            };
            return self.per_file_failure(&name, original, err);
        }

        if self.config.confirm_before_write
            && !self.confirmation.confirm_overwrite(asset, compressed.size)
        {
            info!(file = %name, "Overwrite declined");
            return Ok(OptimizationOutcome::Declined {
                original,
                optimized: compressed.size,
            });
        }

        storage::write_bytes(asset.path(), &optimized)?;
        info!(file = %name, original, optimized = actual, "Replaced with optimized image");

        Ok(OptimizationOutcome::Optimized {
            original,
            optimized: actual,
        })
    }

    /// Process assets one at a time, pausing between files.
    ///
    /// `on_outcome` receives the 1-based position of each asset as it finishes.
    pub async fn run<F>(&self, assets: &[ImageAsset], mut on_outcome: F) -> Result<RunSummary>
    where
        F: FnMut(usize, &ImageAsset, &OptimizationOutcome),
    {
        let mut summary = RunSummary::default();
        let delay = self.config.inter_file_delay();

        for (idx, asset) in assets.iter().enumerate() {
            let outcome = self.optimize(asset).await?;
            summary.record(&outcome);
            on_outcome(idx + 1, asset, &outcome);

            if idx + 1 < assets.len() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        info!(
            optimized = summary.optimized,
            skipped = summary.skipped(),
            failed = summary.failed,
            saved_bytes = summary.saved_bytes(),
            "Optimization run finished"
        );
        Ok(summary)
    }

    fn per_file_failure(
        &self,
        name: &str,
        original: u64,
        err: AppError,
    ) -> Result<OptimizationOutcome> {
        if !err.is_per_file() {
            return Err(err);
        }
        warn!(file = %name, error = %err, "Optimization failed");
        Ok(OptimizationOutcome::Failed {
            original,
            reason: err.to_string(),
        })
    }
}
