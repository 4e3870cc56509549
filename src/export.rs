//! Preview export.

use std::fs;
use std::path::Path;

/// Error during preview save
#[derive(Debug)]
pub struct ExportError {
    pub message: String,
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Write the cleaned preview text to `path`, UTF-8, overwriting any
/// existing file.
pub fn save_preview(path: &Path, text: &str) -> Result<(), ExportError> {
    fs::write(path, text).map_err(|e| ExportError {
        message: format!("could not write {}: {}", path.display(), e),
    })?;
    log::info!("saved preview to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_overwrites() {
        let path = std::env::temp_dir().join("wordlens_export_test.txt");
        save_preview(&path, "first").unwrap();
        save_preview(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        fs::remove_file(path).ok();
    }

    #[test]
    fn unwritable_destination_is_a_recoverable_error() {
        let err = save_preview(Path::new("/no/such/dir/out.txt"), "x").unwrap_err();
        assert!(err.message.contains("could not write"));
    }
}
