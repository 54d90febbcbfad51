//! Project persistence.
//!
//! `save` always receives the whole project and writes answers, status and
//! phase together, so a nested answer edit can never be lost to partial
//! change detection.

use crate::error::{BlueprintError, Result};
use crate::io;
use crate::paths;
use crate::project::Project;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::RwLock;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ProjectStore
// ---------------------------------------------------------------------------

pub trait ProjectStore {
    /// Load a project owned by `owner`. A project owned by someone else is
    /// reported as not found.
    fn load(&self, id: &Uuid, owner: &str) -> Result<Project>;

    fn save(&self, project: &Project) -> Result<()>;

    /// The owner's projects, most recently updated first.
    fn list(&self, owner: &str) -> Result<Vec<Project>>;

    fn delete(&self, id: &Uuid, owner: &str) -> Result<()>;

    fn create(&self, owner: &str, name: &str, description: Option<String>) -> Result<Project> {
        let project = Project::new(owner, name, description);
        self.save(&project)?;
        Ok(project)
    }

    fn duplicate(&self, id: &Uuid, owner: &str) -> Result<Project> {
        let copy = self.load(id, owner)?.duplicate(owner);
        self.save(&copy)?;
        Ok(copy)
    }

    fn update_details(
        &self,
        id: &Uuid,
        owner: &str,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Project> {
        let mut project = self.load(id, owner)?;
        project.update_details(name, description)?;
        self.save(&project)?;
        Ok(project)
    }

    /// `list` narrowed and re-sorted by `query`.
    fn query(&self, owner: &str, query: &ListQuery) -> Result<Vec<Project>> {
        Ok(query.apply(self.list(owner)?))
    }
}

// ---------------------------------------------------------------------------
// ListQuery
// ---------------------------------------------------------------------------

/// Sort key for project listings. Parses `updated_at`, `status`, and their
/// `-`-prefixed descending forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrdering {
    #[default]
    NewestFirst,
    OldestFirst,
    Status,
    StatusDesc,
}

impl FromStr for ListOrdering {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "-updated_at" => Ok(ListOrdering::NewestFirst),
            "updated_at" => Ok(ListOrdering::OldestFirst),
            "status" => Ok(ListOrdering::Status),
            "-status" => Ok(ListOrdering::StatusDesc),
            other => Err(BlueprintError::InvalidOrdering(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    pub ordering: ListOrdering,
}

impl ListQuery {
    pub fn matches(&self, project: &Project) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        project.name.to_lowercase().contains(&needle)
            || project
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    pub fn apply(&self, projects: Vec<Project>) -> Vec<Project> {
        let mut projects: Vec<Project> = projects.into_iter().filter(|p| self.matches(p)).collect();
        match self.ordering {
            ListOrdering::NewestFirst => newest_first(&mut projects),
            ListOrdering::OldestFirst => projects.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
            ListOrdering::Status => {
                newest_first(&mut projects);
                projects.sort_by(|a, b| a.status.as_str().cmp(b.status.as_str()));
            }
            ListOrdering::StatusDesc => {
                newest_first(&mut projects);
                projects.sort_by(|a, b| b.status.as_str().cmp(a.status.as_str()));
            }
        }
        projects
    }
}

fn not_found(id: &Uuid) -> BlueprintError {
    BlueprintError::ProjectNotFound(id.to_string())
}

fn newest_first(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// One YAML manifest per project under `.blueprint/projects/<id>/`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, id: &Uuid) -> Result<Project> {
        let manifest = paths::project_manifest(&self.root, id);
        if !manifest.exists() {
            return Err(not_found(id));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let project: Project = serde_yaml::from_str(&data)?;
        Ok(project)
    }
}

impl ProjectStore for FileStore {
    fn load(&self, id: &Uuid, owner: &str) -> Result<Project> {
        let project = self.read(id)?;
        if project.owner != owner {
            return Err(not_found(id));
        }
        Ok(project)
    }

    fn save(&self, project: &Project) -> Result<()> {
        let manifest = paths::project_manifest(&self.root, &project.id);
        let data = serde_yaml::to_string(project)?;
        io::atomic_write(&manifest, data.as_bytes())
    }

    fn list(&self, owner: &str) -> Result<Vec<Project>> {
        let projects_dir = paths::projects_dir(&self.root);
        if !projects_dir.exists() {
            return Ok(Vec::new());
        }

        let mut projects = Vec::new();
        for entry in std::fs::read_dir(&projects_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let Ok(id) = Uuid::parse_str(&name) else {
                continue;
            };
            match self.read(&id) {
                Ok(p) if p.owner == owner => projects.push(p),
                Ok(_) | Err(BlueprintError::ProjectNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        newest_first(&mut projects);
        Ok(projects)
    }

    fn delete(&self, id: &Uuid, owner: &str) -> Result<()> {
        self.load(id, owner)?;
        std::fs::remove_dir_all(paths::project_dir(&self.root, id))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: RwLock<HashMap<Uuid, Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn load(&self, id: &Uuid, owner: &str) -> Result<Project> {
        let projects = self
            .projects
            .read()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        projects
            .get(id)
            .filter(|p| p.owner == owner)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn save(&self, project: &Project) -> Result<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        projects.insert(project.id, project.clone());
        Ok(())
    }

    fn list(&self, owner: &str) -> Result<Vec<Project>> {
        let projects = self
            .projects
            .read()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let mut owned: Vec<Project> = projects
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect();
        newest_first(&mut owned);
        Ok(owned)
    }

    fn delete(&self, id: &Uuid, owner: &str) -> Result<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        match projects.get(id) {
            Some(p) if p.owner == owner => {
                projects.remove(id);
                Ok(())
            }
            _ => Err(not_found(id)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
