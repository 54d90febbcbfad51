pub mod artifact;
pub mod catalog;
pub mod flow;
pub mod init;
pub mod project;
pub mod ui;

use blueprint_core::paths;
use blueprint_core::store::FileStore;
use std::path::Path;
use uuid::Uuid;

/// What every project command needs: where, as whom, and how to print.
pub struct Ctx<'a> {
    pub root: &'a Path,
    pub owner: &'a str,
    pub json: bool,
}

impl Ctx<'_> {
    pub fn store(&self) -> FileStore {
        FileStore::new(self.root)
    }
}

pub fn project_id(id: &str) -> anyhow::Result<Uuid> {
    Ok(paths::parse_project_id(id)?)
}
