use crate::error::AppError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Immediate children of a folder, split by whether they look like images.
#[derive(Debug, Default)]
pub struct FolderListing {
    pub images: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Lists the direct entries of `folder` whose name ends, case-insensitively,
/// with `.<ext>` for one of `allowed_extensions`.
pub fn list_images(
    folder: &Path,
    allowed_extensions: &HashSet<String>,
) -> Result<FolderListing, AppError> {
    log::info!("Starting file discovery in {:?}", folder);
    log::debug!("Configured allowed extensions: {:?}", allowed_extensions);

    let suffixes: Vec<String> = allowed_extensions
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.').to_lowercase()))
        .collect();

    let mut listing = FolderListing::default();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                // An entry that exists but cannot be inspected (for example a
                // dangling symlink) is still classified by its name, so a
                // matching one reaches extraction and fails there visibly.
                log::warn!("Could not inspect directory entry: {}", e);
                if let Some(path) = e.path() {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_lowercase())
                        .unwrap_or_default();
                    if suffixes.iter().any(|suffix| name.ends_with(suffix)) {
                        listing.images.push(path.to_path_buf());
                    } else {
                        listing.skipped.push(path.to_path_buf());
                    }
                }
                continue;
            }
        };
        let path = entry.path();
        log::trace!("Discovered entry: {:?}", path);

        let name = entry.file_name().to_string_lossy().to_lowercase();
        if !entry.file_type().is_file() {
            log::info!("Skipping non-file entry: {:?}", path);
            listing.skipped.push(path.to_path_buf());
        } else if suffixes.iter().any(|suffix| name.ends_with(suffix)) {
            log::debug!("Queueing image file: {:?}", path);
            listing.images.push(path.to_path_buf());
        } else {
            log::info!("Skipping non-image file: {:?}", path);
            listing.skipped.push(path.to_path_buf());
        }
    }

    log::info!(
        "File discovery complete: {} images, {} skipped.",
        listing.images.len(),
        listing.skipped.len()
    );
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn extensions(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_matches_extensions_case_insensitively() {
        let dir = TempDir::new().unwrap();
        for name in ["a.jpg", "B.JPEG", "c.Tif", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let listing = list_images(dir.path(), &extensions(&["jpg", "jpeg", "tiff", "tif"])).unwrap();
        assert_eq!(names(&listing.images), vec!["B.JPEG", "a.jpg", "c.Tif"]);
        assert_eq!(names(&listing.skipped), vec!["notes.txt"]);
    }

    #[test]
    fn test_does_not_descend_into_subfolders() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("album.jpg");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("inner.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("top.jpg"), b"x").unwrap();

        let listing = list_images(dir.path(), &extensions(&["jpg"])).unwrap();
        assert_eq!(names(&listing.images), vec!["top.jpg"]);
        assert_eq!(names(&listing.skipped), vec!["album.jpg"]);
    }

    #[test]
    fn test_png_only_when_configured() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("shot.png"), b"x").unwrap();

        let listing = list_images(dir.path(), &extensions(&["jpg"])).unwrap();
        assert!(listing.images.is_empty());

        let listing = list_images(dir.path(), &extensions(&["jpg", "png"])).unwrap();
        assert_eq!(names(&listing.images), vec!["shot.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_listed_by_name() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.jpg"), dir.path().join("dangling.jpg"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("dangling.txt"))
            .unwrap();
        std::fs::write(dir.path().join("real.jpg"), b"x").unwrap();

        let listing = list_images(dir.path(), &extensions(&["jpg"])).unwrap();
        assert_eq!(names(&listing.images), vec!["dangling.jpg", "real.jpg"]);
        assert_eq!(names(&listing.skipped), vec!["dangling.txt"]);
    }

    #[test]
    fn test_unreadable_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = list_images(&missing, &extensions(&["jpg"]));
        assert!(matches!(result, Err(AppError::Walkdir(_))));
    }
}
