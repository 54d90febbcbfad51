use crate::error::{BlueprintError, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BLUEPRINT_DIR: &str = ".blueprint";
pub const PROJECTS_DIR: &str = ".blueprint/projects";
pub const CONFIG_FILE: &str = ".blueprint/config.yaml";
pub const MANIFEST_FILE: &str = "manifest.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn blueprint_dir(root: &Path) -> PathBuf {
    root.join(BLUEPRINT_DIR)
}

pub fn projects_dir(root: &Path) -> PathBuf {
    root.join(PROJECTS_DIR)
}

pub fn project_dir(root: &Path, id: &Uuid) -> PathBuf {
    projects_dir(root).join(id.to_string())
}

pub fn project_manifest(root: &Path, id: &Uuid) -> PathBuf {
    project_dir(root, id).join(MANIFEST_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Id parsing
// ---------------------------------------------------------------------------

pub fn parse_project_id(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s.trim()).map_err(|_| BlueprintError::InvalidProjectId(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/work");
        let id = Uuid::parse_str("6f1c2f8e-2b7a-4f55-9a57-0c1d2e3f4a5b").unwrap();
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/work/.blueprint/config.yaml")
        );
        assert_eq!(
            project_manifest(root, &id),
            PathBuf::from(
                "/tmp/work/.blueprint/projects/6f1c2f8e-2b7a-4f55-9a57-0c1d2e3f4a5b/manifest.yaml"
            )
        );
    }

    #[test]
    fn project_ids() {
        assert!(parse_project_id("6f1c2f8e-2b7a-4f55-9a57-0c1d2e3f4a5b").is_ok());
        for bad in ["", "taxi-app", "../etc/passwd", "6f1c2f8e"] {
            assert!(
                matches!(parse_project_id(bad), Err(BlueprintError::InvalidProjectId(_))),
                "expected invalid: {bad}"
            );
        }
    }
}
