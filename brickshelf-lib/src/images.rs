//! Managed image directory.
//!
//! Attaching an image copies the source file into the library under a name
//! derived from the record, and the record keeps only that filename.

use std::path::{Path, PathBuf};

use brickshelf_catalog::RecordId;
use thiserror::Error;

/// File extensions accepted for record images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported image type '.{0}' (expected one of: jpg, jpeg, png, gif, webp)")]
    UnsupportedType(String),
}

/// A directory of record images addressed by filename.
#[derive(Debug, Clone)]
pub struct ImageLibrary {
    root: PathBuf,
}

impl ImageLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy `source` into the library and return the stored filename.
    ///
    /// An existing file with the same name is overwritten.
    pub fn store_image(
        &self,
        id: RecordId,
        primary_code: &str,
        source: &Path,
    ) -> Result<String, ImageError> {
        let extension = match source.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                    return Err(ImageError::UnsupportedType(ext));
                }
                ext
            }
            None => DEFAULT_EXTENSION.to_string(),
        };

        std::fs::create_dir_all(&self.root)?;
        let filename = image_file_name(id, primary_code, &extension);
        let dest = self.root.join(&filename);
        std::fs::copy(source, &dest)?;
        log::debug!("Stored image {} -> {}", source.display(), dest.display());
        Ok(filename)
    }

    /// Delete a stored image. A file that is already gone is not an error.
    pub fn remove_image(&self, filename: &str) -> Result<(), ImageError> {
        let path = self.image_path(filename);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed image {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Full path for a stored filename. Directory components in `filename`
    /// are dropped so the result always stays inside the library.
    pub fn image_path(&self, filename: &str) -> PathBuf {
        match Path::new(filename).file_name() {
            Some(name) => self.root.join(name),
            None => self.root.join(sanitize_code(filename)),
        }
    }
}

/// Stored filename for a record image: `{id}_{sanitized code}.{ext}`.
pub fn image_file_name(id: RecordId, primary_code: &str, extension: &str) -> String {
    format!("{}_{}.{}", id, sanitize_code(primary_code), extension)
}

/// Replace characters that are unsafe in filenames with `_`.
pub fn sanitize_code(code: &str) -> String {
    code.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/images_tests.rs"]
mod tests;
