// ============================================================
// ASSET DOMAIN LAYER
// ============================================================
// Image asset types, optimization outcomes and policy configuration
// No I/O, no async

mod image_asset;
mod optimizer_config;
mod outcome;

pub use image_asset::{ImageAsset, ImageFormat};
pub use optimizer_config::OptimizerConfig;
pub use outcome::{OptimizationOutcome, RunSummary};
