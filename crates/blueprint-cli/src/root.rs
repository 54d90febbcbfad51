use blueprint_core::config::{Config, DEFAULT_OWNER};
use blueprint_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the blueprint root directory.
///
/// Priority:
/// 1. `--root` flag / `BLUEPRINT_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.blueprint/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_marked_ancestor(&cwd).unwrap_or(cwd)
}

fn find_marked_ancestor(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(paths::BLUEPRINT_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Resolve the acting owner: `--owner` / `BLUEPRINT_OWNER`, then the
/// config's `default_owner`, then the built-in default.
pub fn resolve_owner(root: &Path, explicit: Option<&str>) -> String {
    if let Some(owner) = explicit.map(str::trim).filter(|o| !o.is_empty()) {
        return owner.to_string();
    }
    match Config::load(root) {
        Ok(cfg) if !cfg.default_owner.trim().is_empty() => cfg.default_owner,
        _ => DEFAULT_OWNER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_blueprint_dir_above() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".blueprint")).unwrap();
        let subdir = dir.path().join("src/deep");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_marked_ancestor(&subdir).unwrap(), dir.path());
    }

    #[test]
    fn owner_precedence() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_owner(dir.path(), None), DEFAULT_OWNER);

        Config::new("team").save(dir.path()).unwrap();
        assert_eq!(resolve_owner(dir.path(), None), "team");
        assert_eq!(resolve_owner(dir.path(), Some("alice")), "alice");
        assert_eq!(resolve_owner(dir.path(), Some(" ")), "team");
    }
}
