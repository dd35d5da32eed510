//! Persistence of generated artifacts
//!
//! Artifacts land in a per-day directory under the output root:
//! `<root>/output_<YYYYMMDD>/nano_banana_<YYYY_MM_DD-HH_MM_SS>.png` for images
//! and `.../text_<YYYY_MM_DD-HH_MM_SS>.txt` for text fallbacks. Names have
//! second-level resolution, so two saves within the same second overwrite.

use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};

const IMAGE_PREFIX: &str = "nano_banana";
const TEXT_PREFIX: &str = "text";
const STAMP_FORMAT: &str = "%Y_%m_%d-%H_%M_%S";

pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The dated directory for `at`. Not created.
    pub fn dated_dir(&self, at: NaiveDateTime) -> PathBuf {
        self.root.join(format!("output_{}", at.format("%Y%m%d")))
    }

    pub fn image_path(&self, at: NaiveDateTime) -> PathBuf {
        self.dated_dir(at)
            .join(format!("{}_{}.png", IMAGE_PREFIX, at.format(STAMP_FORMAT)))
    }

    pub fn text_path(&self, at: NaiveDateTime) -> PathBuf {
        self.dated_dir(at)
            .join(format!("{}_{}.txt", TEXT_PREFIX, at.format(STAMP_FORMAT)))
    }

    pub async fn save_image(&self, image: &DynamicImage) -> Result<PathBuf> {
        self.save_image_at(image, Local::now().naive_local()).await
    }

    pub async fn save_image_at(&self, image: &DynamicImage, at: NaiveDateTime) -> Result<PathBuf> {
        let path = self.image_path(at);
        tokio::fs::create_dir_all(self.dated_dir(at)).await?;

        tokio::task::spawn_blocking({
            let image = image.clone();
            let path = path.clone();
            move || image.save_with_format(path, ImageFormat::Png)
        })
        .await
        .map_err(|e| Error::Invariant(format!("Image save task join error: {}", e)))??;

        tracing::info!("Saved generated image to {}", path.display());
        Ok(path)
    }

    pub async fn save_text(&self, text: &str) -> Result<PathBuf> {
        self.save_text_at(text, Local::now().naive_local()).await
    }

    /// Write `text` verbatim as UTF-8.
    pub async fn save_text_at(&self, text: &str, at: NaiveDateTime) -> Result<PathBuf> {
        let path = self.text_path(at);
        tokio::fs::create_dir_all(self.dated_dir(at)).await?;
        tokio::fs::write(&path, text.as_bytes()).await?;

        tracing::info!("Saved text response to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 3)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_paths_follow_layout() {
        let store = OutputStore::new(Path::new("/renders"));

        assert_eq!(
            store.dated_dir(at()),
            PathBuf::from("/renders/output_20250903")
        );
        assert_eq!(
            store.image_path(at()),
            PathBuf::from("/renders/output_20250903/nano_banana_2025_09_03-14_05_09.png")
        );
        assert_eq!(
            store.text_path(at()),
            PathBuf::from("/renders/output_20250903/text_2025_09_03-14_05_09.txt")
        );
    }

    #[tokio::test]
    async fn test_save_image_creates_directory_and_png() {
        let dir = TempDir::new().unwrap();
        let store = OutputStore::new(dir.path());
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([0, 255, 0])));

        let path = store.save_image_at(&img, at()).await.unwrap();

        assert!(path.exists());
        assert_eq!(path, store.image_path(at()));
        let reloaded = image::open(&path).unwrap();
        assert_eq!(reloaded.to_rgb8(), img.to_rgb8());
    }

    #[tokio::test]
    async fn test_save_text_writes_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = OutputStore::new(dir.path());
        let text = "Line one\nLine two — with unicode ✓\n";

        let path = store.save_text_at(text, at()).await.unwrap();

        assert!(path.to_string_lossy().ends_with(".txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[tokio::test]
    async fn test_save_image_uses_current_time() {
        let dir = TempDir::new().unwrap();
        let store = OutputStore::new(dir.path());
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));

        let path = store.save_image(&img).await.unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("nano_banana_"));
        assert!(name.ends_with(".png"));
        assert!(path
            .parent()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("output_"));
    }
}
