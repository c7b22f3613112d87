use std::path::Path;

use tracing::{debug, info};

use crate::domain::assets::{ImageAsset, ImageFormat, OptimizerConfig};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::storage;

/// Upper bound for the automatically chosen single-file sample
pub const SAMPLE_MAX_BYTES: u64 = 500 * 1024;

/// Describe one file as an asset, rejecting formats the provider cannot take
pub fn asset_from_path(path: &Path) -> Result<ImageAsset> {
    let format = path
        .extension()
        .and_then(|ext| ImageFormat::from_extension(&ext.to_string_lossy()))
        .ok_or_else(|| {
            AppError::ValidationError(format!("Unsupported image type: {}", path.display()))
        })?;
    let size = std::fs::metadata(path)
        .map_err(|e| AppError::IoError(format!("Failed to stat {}: {}", path.display(), e)))?
        .len();
    Ok(ImageAsset::new(path.to_path_buf(), size, format))
}

/// Collect the optimizable images directly inside `dir`, sorted by name
pub fn scan_assets(dir: &Path, config: &OptimizerConfig) -> Result<Vec<ImageAsset>> {
    let mut assets = Vec::new();

    for path in storage::list_files(dir)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if config.is_excluded(&name) {
            info!(file = %name, "Skipping excluded file");
            continue;
        }
        if !config.is_allowed_extension(&path) {
            debug!(file = %name, "Ignoring non-image file");
            continue;
        }

        match asset_from_path(&path) {
            Ok(asset) => assets.push(asset),
            Err(AppError::ValidationError(reason)) => debug!(file = %name, reason = %reason, "Ignoring file"),
            Err(err) => return Err(err),
        }
    }

    Ok(assets)
}

/// Pick a PNG for a trial run: the first one between the minimum size and
/// 500 KiB, otherwise the first PNG of any size
pub fn select_sample<'a>(assets: &'a [ImageAsset], config: &OptimizerConfig) -> Option<&'a ImageAsset> {
    let pngs = || assets.iter().filter(|a| a.format == ImageFormat::Png);
    pngs()
        .find(|a| a.size >= config.min_size_bytes && a.size < SAMPLE_MAX_BYTES)
        .or_else(|| pngs().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "zebra.webp", 10);
        write(dir.path(), "alpha.PNG", 20);
        write(dir.path(), "notes.txt", 5);
        write(dir.path(), "desktop.ini", 5);
        write(dir.path(), "sample_tile1.png", 5);
        write(dir.path(), "photo.jpg", 30);

        let assets = scan_assets(dir.path(), &OptimizerConfig::default()).unwrap();
        let names: Vec<_> = assets.iter().map(|a| a.file_name()).collect();

        assert_eq!(names, vec!["alpha.PNG", "photo.jpg", "zebra.webp"]);
        assert_eq!(assets[0].size, 20);
        assert_eq!(assets[0].format, ImageFormat::Png);
        assert_eq!(assets[1].format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_scan_missing_directory() {
        let err = scan_assets(Path::new("/no/such/project_tiles"), &OptimizerConfig::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_asset_from_path_rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "anim.gif", 3);
        assert!(matches!(
            asset_from_path(&path),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_select_sample_prefers_mid_sized_png() {
        let config = OptimizerConfig::conservative();
        let assets = vec![
            ImageAsset::new("big.png".into(), 900 * 1024, ImageFormat::Png),
            ImageAsset::new("tiny.png".into(), 10 * 1024, ImageFormat::Png),
            ImageAsset::new("photo.jpg".into(), 300 * 1024, ImageFormat::Jpeg),
            ImageAsset::new("mid.png".into(), 300 * 1024, ImageFormat::Png),
        ];
        assert_eq!(select_sample(&assets, &config).unwrap().file_name(), "mid.png");
    }

    #[test]
    fn test_select_sample_falls_back_to_any_png() {
        let config = OptimizerConfig::conservative();
        let assets = vec![
            ImageAsset::new("photo.jpg".into(), 300 * 1024, ImageFormat::Jpeg),
            ImageAsset::new("big.png".into(), 900 * 1024, ImageFormat::Png),
        ];
        assert_eq!(select_sample(&assets, &config).unwrap().file_name(), "big.png");

        let no_png = vec![ImageAsset::new("photo.jpg".into(), 1, ImageFormat::Jpeg)];
        assert!(select_sample(&no_png, &config).is_none());
    }
}
