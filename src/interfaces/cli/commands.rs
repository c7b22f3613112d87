use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::prompt::{ask_yes, StdinConfirmation};
use super::report::{kb, outcome_line, summary_lines};
use super::OptimizeArgs;
use crate::application::use_cases::asset_scanner::{asset_from_path, scan_assets, select_sample};
use crate::application::{ImageOptimizer, MenuBuilder};
use crate::domain::assets::OptimizerConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::compression::tinify::{
    parse_shrink_body, provider_error, COMPRESSION_COUNT_HEADER,
};
use crate::infrastructure::compression::TinifyClient;
use crate::infrastructure::config::{mask_key, ConfigService};
use crate::infrastructure::storage;

/// 1x1 PNG used to test the API key without spending a real asset
const CHECK_PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x02\x00\x00\x00\x90wS\xde\x00\x00\x00\tpHYs\x00\x00\x0b\x13\x00\x00\x0b\x13\x01\x00\x9a\x9c\x18\x00\x00\x00\x0cIDATx\x9cc```\x00\x00\x00\x04\x00\x01\xf6\x178U\x00\x00\x00\x00IEND\xaeB`\x82";

const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

pub fn menu(csv: &Path, out: &Path) -> Result<()> {
    let build = MenuBuilder::default().convert(csv, out)?;
    println!(
        "Converted {} -> {} with {} top-level categories.",
        csv.display(),
        out.display(),
        build.document.len()
    );
    Ok(())
}

fn load_config(preset: OptimizerConfig, args: &OptimizeArgs) -> Result<OptimizerConfig> {
    let mut service = ConfigService::new(preset);
    if let Some(path) = &args.config {
        service = service.with_file(path)?;
    }
    let mut config = service.with_env().load()?;
    if let Some(dir) = &args.dir {
        config.assets_dir = dir.clone();
    }
    if args.yes {
        config.confirm_before_write = false;
    }
    Ok(config)
}

fn connect(config: &OptimizerConfig) -> Result<TinifyClient> {
    let api_key = ConfigService::api_key()?;
    println!("Using API key: {}", mask_key(&api_key));
    TinifyClient::new(config, &api_key)
}

fn print_settings(config: &OptimizerConfig) {
    println!("Settings:");
    if config.min_size_bytes > 0 {
        println!("  - Only optimize files of {} or more", kb(config.min_size_bytes));
    }
    if let Some(max) = config.max_reduction_percent {
        println!("  - Maximum reduction: {}%", max);
    }
    println!();
}

/// The conservative bulk run asks once before touching anything; the plain
/// bulk run and `--yes` proceed without reading `input`
fn confirm_run<R: BufRead>(args: &OptimizeArgs, input: &mut R) -> bool {
    if !args.conservative || args.yes {
        return true;
    }
    ask_yes("This will overwrite images in place.", input)
}

pub async fn optimize(args: &OptimizeArgs) -> Result<()> {
    let preset = if args.conservative {
        OptimizerConfig::conservative()
    } else {
        OptimizerConfig::bulk()
    };
    let config = load_config(preset, args)?;

    println!("=== Image Optimization ===");
    let client = connect(&config)?;
    print_settings(&config);

    let assets = scan_assets(&config.assets_dir, &config)?;
    if assets.is_empty() {
        println!("No image files found to optimize.");
        return Ok(());
    }

    println!("Found {} image files to check:", assets.len());
    for asset in &assets {
        println!("  - {} ({})", asset.file_name(), kb(asset.size));
    }
    println!();

    if !confirm_run(args, &mut io::stdin().lock()) {
        println!("Operation cancelled.");
        return Ok(());
    }

    let total = assets.len();
    let optimizer = ImageOptimizer::new(Arc::new(client), config);
    let summary = optimizer
        .run(&assets, |position, asset, outcome| {
            println!("{}", outcome_line(position, total, asset, outcome));
        })
        .await?;

    println!();
    for line in summary_lines(&summary) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn optimize_one(file: Option<&Path>, args: &OptimizeArgs) -> Result<()> {
    let preset = if args.conservative {
        OptimizerConfig {
            confirm_before_write: true,
            ..OptimizerConfig::conservative()
        }
    } else {
        OptimizerConfig::single()
    };
    let config = load_config(preset, args)?;

    println!("=== Single Image Optimization ===");
    let client = connect(&config)?;
    print_settings(&config);

    let asset = match file {
        Some(path) => asset_from_path(path)?,
        None => {
            let assets = scan_assets(&config.assets_dir, &config)?;
            select_sample(&assets, &config).cloned().ok_or_else(|| {
                AppError::NotFound(format!(
                    "No PNG files found in {}",
                    config.assets_dir.display()
                ))
            })?
        }
    };
    println!("Testing with file: {} ({})", asset.file_name(), kb(asset.size));

    let optimizer =
        ImageOptimizer::new(Arc::new(client), config).with_confirmation(Arc::new(StdinConfirmation));
    let outcome = optimizer.optimize(&asset).await?;
    println!("{}", outcome_line(1, 1, &asset, &outcome));

    if outcome.is_failed() {
        return Err(AppError::Internal(format!(
            "Optimization of {} failed",
            asset.file_name()
        )));
    }
    Ok(())
}

pub async fn check_api() -> Result<()> {
    let config = ConfigService::new(OptimizerConfig::default()).with_env().load()?;
    let api_key = ConfigService::api_key()?;
    let client = TinifyClient::with_timeout(&config, &api_key, CHECK_TIMEOUT)?;

    println!("Making request to: {}", client.endpoint());
    let raw = client.shrink_raw(CHECK_PNG.to_vec()).await?;
    println!("Response status: {}", raw.status);
    if raw.status != 201 {
        return Err(provider_error(raw.status, &raw.body));
    }

    let result = parse_shrink_body(&raw.body)?;
    println!("API connection successful!");
    println!(
        "Compression count: {}",
        raw.header(COMPRESSION_COUNT_HEADER).unwrap_or("Unknown")
    );
    info!(size = result.size, "Check image compressed");
    Ok(())
}

pub async fn inspect(file: &Path) -> Result<()> {
    let config = ConfigService::new(OptimizerConfig::default()).with_env().load()?;
    let client = connect(&config)?;

    let image = storage::read_bytes(file)?;
    println!("Testing with: {} ({} bytes)", file.display(), image.len());

    let raw = client.shrink_raw(image).await?;
    println!("Response status: {}", raw.status);
    println!("Response headers:");
    for (name, value) in &raw.headers {
        println!("  {}: {}", name, value);
    }
    if let Some(count) = raw.header(COMPRESSION_COUNT_HEADER) {
        println!("Compression count: {}", count);
    }
    println!("Response content length: {} bytes", raw.body.len());

    match serde_json::from_slice::<serde_json::Value>(&raw.body) {
        Ok(json) => {
            println!("Response is JSON:");
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(_) => println!("{}", describe_binary(&raw.body)),
    }
    Ok(())
}

/// Name the image format of a binary body, or show its magic bytes
fn describe_binary(body: &[u8]) -> String {
    match image::guess_format(body) {
        Ok(format) => format!("Response is binary, appears to be a valid {:?} image", format),
        Err(_) => {
            let magic: String = body.iter().take(8).map(|b| format!("{:02x}", b)).collect();
            format!("Response is binary but not a recognized image (magic bytes: {})", magic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_image_is_png() {
        assert!(matches!(
            image::guess_format(CHECK_PNG),
            Ok(image::ImageFormat::Png)
        ));
    }

    #[test]
    fn test_describe_binary() {
        assert!(describe_binary(CHECK_PNG).contains("Png"));
        assert_eq!(
            describe_binary(b"\x00\x01\x02\x03\x04\x05\x06\x07\x08"),
            "Response is binary but not a recognized image (magic bytes: 0001020304050607)"
        );
    }

    #[test]
    fn test_yes_flag_disables_confirmation() {
        let args = OptimizeArgs {
            yes: true,
            dir: Some("tiles".into()),
            ..Default::default()
        };
        let config = load_config(OptimizerConfig::single(), &args).unwrap();
        assert!(!config.confirm_before_write);
        assert_eq!(config.assets_dir, Path::new("tiles"));
    }

    #[test]
    fn test_plain_bulk_run_never_prompts() {
        let mut input = std::io::Cursor::new("");
        assert!(confirm_run(&OptimizeArgs::default(), &mut input));
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_conservative_run_asks_up_front() {
        let args = OptimizeArgs {
            conservative: true,
            ..Default::default()
        };
        assert!(!confirm_run(&args, &mut std::io::Cursor::new("")));
        assert!(!confirm_run(&args, &mut std::io::Cursor::new("no\n")));
        assert!(confirm_run(&args, &mut std::io::Cursor::new("yes\n")));

        let mut input = std::io::Cursor::new("no\n");
        let skip = OptimizeArgs { yes: true, ..args };
        assert!(confirm_run(&skip, &mut input));
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_menu_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("projects.csv");
        let out = dir.path().join("site/menu.json");
        std::fs::write(&csv, "Project Title,Category\nStore,E-Commerce\n").unwrap();

        menu(&csv, &out).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);
    }
}
