//! Car image files on disk.

use seed_generator::CarImage;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Image directory inside the application container.
pub const CONTAINER_IMAGES_DIR: &str = "/app/frontend/public/assets/cars";
/// Image directory relative to a checkout's `backend/scripts`.
pub const LOCAL_IMAGES_DIR: &str = "../../frontend/public/assets/cars";

/// Pick the image directory: an explicit override wins, otherwise the
/// container path when it exists, otherwise the checkout-relative path.
pub fn resolve_images_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    let container = Path::new(CONTAINER_IMAGES_DIR);
    if container.exists() {
        container.to_path_buf()
    } else {
        PathBuf::from(LOCAL_IMAGES_DIR)
    }
}

/// Read the listed files. Display order is the file's position in `files`;
/// unreadable files are skipped with a warning and leave a gap.
pub async fn load_images(dir: &Path, files: &[String]) -> (Vec<CarImage>, usize) {
    let mut images = Vec::with_capacity(files.len());
    let mut skipped = 0;

    for (position, file) in files.iter().enumerate() {
        let path = dir.join(file);
        match tokio::fs::read(&path).await {
            Ok(data) => images.push(CarImage::new(file, data, position as i32)),
            Err(e) => {
                warn!("Skipping image {}: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    (images, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let dir = resolve_images_dir(Some(Path::new("/tmp/cars")));
        assert_eq!(dir, PathBuf::from("/tmp/cars"));
    }

    #[tokio::test]
    async fn test_load_images_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"png-bytes").unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"jpg").unwrap();

        let files = vec![
            "a.png".to_string(),
            "missing.png".to_string(),
            "b.jpg".to_string(),
        ];
        let (images, skipped) = load_images(dir.path(), &files).await;

        assert_eq!(skipped, 1);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].mime_type, "image/png");
        assert_eq!(images[0].size(), 9);
        assert_eq!(images[1].mime_type, "image/jpeg");
        assert_eq!(images[0].display_order, 0);
        assert_eq!(images[1].display_order, 2);
    }
}
