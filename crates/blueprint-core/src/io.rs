use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `data` via a sibling tempfile and rename, creating
/// the project directory on first save. A reader sees the previous manifest
/// or the new one, never a half-written file.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_save_creates_project_dir() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("projects/abc/manifest.yaml");
        atomic_write(&manifest, b"name: Taxi\n").unwrap();
        assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "name: Taxi\n");
    }

    #[test]
    fn resave_replaces_and_leaves_no_tempfiles() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("manifest.yaml");
        atomic_write(&manifest, b"status: draft\n").unwrap();
        atomic_write(&manifest, b"status: in_progress\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(&manifest).unwrap(),
            "status: in_progress\n"
        );
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
