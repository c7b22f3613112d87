use crate::application::use_cases::image_optimizer::reduction_percent;
use crate::domain::assets::{ImageAsset, OptimizationOutcome, RunSummary};

pub fn kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

pub fn mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// One operator-facing line per processed file
pub fn outcome_line(position: usize, total: usize, asset: &ImageAsset, outcome: &OptimizationOutcome) -> String {
    let detail = match outcome {
        OptimizationOutcome::TooSmall { .. } => "skipped, already small enough".to_string(),
        OptimizationOutcome::TooAggressive { original, reported } => format!(
            "skipped, {:.1}% reduction to {} is too aggressive",
            reduction_percent(*original, *reported),
            kb(*reported)
        ),
        OptimizationOutcome::Declined { optimized, .. } => {
            format!("kept original, overwrite with {} not confirmed", kb(*optimized))
        }
        OptimizationOutcome::Optimized { original, optimized } => format!(
            "optimized to {} (saved {}, {:.1}%)",
            kb(*optimized),
            kb(original.saturating_sub(*optimized)),
            reduction_percent(*original, *optimized)
        ),
        OptimizationOutcome::Failed { reason, .. } => format!("failed, {}", reason),
    };
    format!(
        "[{}/{}] {} ({}): {}",
        position,
        total,
        asset.file_name(),
        kb(outcome.original_size()),
        detail
    )
}

pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        "=== Optimization Summary ===".to_string(),
        format!("Successfully optimized: {} files", summary.optimized),
        format!(
            "Skipped: {} files ({} too small, {} too aggressive, {} declined)",
            summary.skipped(),
            summary.too_small,
            summary.too_aggressive,
            summary.declined
        ),
        format!("Failed: {} files", summary.failed),
    ];

    if summary.optimized > 0 {
        lines.push(format!("Total original size: {}", mb(summary.total_original)));
        lines.push(format!("Total optimized size: {}", mb(summary.total_final)));
        lines.push(format!(
            "Total space saved: {} ({:.1}%)",
            mb(summary.saved_bytes()),
            summary.saved_percent()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assets::ImageFormat;

    fn asset() -> ImageAsset {
        ImageAsset::new("tiles/bezier.png".into(), 300_000, ImageFormat::Png)
    }

    #[test]
    fn test_outcome_lines() {
        let line = outcome_line(
            1,
            3,
            &asset(),
            &OptimizationOutcome::Optimized {
                original: 300_000,
                optimized: 250_000,
            },
        );
        assert_eq!(
            line,
            "[1/3] bezier.png (293.0 KB): optimized to 244.1 KB (saved 48.8 KB, 16.7%)"
        );

        let line = outcome_line(
            2,
            3,
            &asset(),
            &OptimizationOutcome::TooAggressive {
                original: 300_000,
                reported: 150_000,
            },
        );
        assert!(line.contains("50.0% reduction"));

        let line = outcome_line(
            3,
            3,
            &asset(),
            &OptimizationOutcome::Failed {
                original: 300_000,
                reason: "Transport error: Request timed out after 30s".to_string(),
            },
        );
        assert!(line.ends_with("failed, Transport error: Request timed out after 30s"));
    }

    #[test]
    fn test_summary_totals_only_when_optimized() {
        let mut summary = RunSummary::default();
        summary.record(&OptimizationOutcome::TooSmall { original: 100 });
        assert_eq!(summary_lines(&summary).len(), 4);

        summary.record(&OptimizationOutcome::Optimized {
            original: 2 * 1024 * 1024,
            optimized: 1024 * 1024,
        });
        let lines = summary_lines(&summary);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "Successfully optimized: 1 files");
        assert!(lines[6].starts_with("Total space saved: 1.00 MB"));
    }
}
