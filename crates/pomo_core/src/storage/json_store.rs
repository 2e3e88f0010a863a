use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.json";

/// Owner of the ordered task list. Every mutating call rewrites the whole
/// store file synchronously; the in-memory list stays authoritative even
/// when a write fails.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("POMOAPP_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::persistence("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("pomoapp").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::persistence("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("pomoapp")
            .join(STORE_FILE_NAME))
    }
}

/// Reads the task list. A missing or unparseable file is "no tasks yet",
/// never an error.
pub fn load_tasks(path: &Path) -> Vec<Task> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::persistence(err.to_string()))?;
    }

    let content =
        serde_json::to_string_pretty(tasks).map_err(|err| AppError::persistence(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::persistence(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::persistence(err.to_string()))?;
    }

    Ok(())
}

impl TaskStore {
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let tasks = load_tasks(&path);
        Self { path, tasks }
    }

    pub fn open_default() -> Result<Self, AppError> {
        Ok(Self::open(store_path()?))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, name: &str) -> Result<(), AppError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("task name is required"));
        }

        self.tasks.push(Task::new(trimmed));
        self.persist()
    }

    /// Removes the task at `index`. Out-of-bounds indices are a no-op, not
    /// an error.
    pub fn remove(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.tasks.len() {
            return Ok(());
        }

        self.tasks.remove(index);
        self.persist()
    }

    pub fn increment_sessions(&mut self, index: usize) -> Result<(), AppError> {
        let Some(task) = self.tasks.get_mut(index) else {
            return Ok(());
        };

        task.sessions += 1;
        self.persist()
    }

    pub fn reset_sessions(&mut self, index: usize) -> Result<(), AppError> {
        let Some(task) = self.tasks.get_mut(index) else {
            return Ok(());
        };

        task.sessions = 0;
        self.persist()
    }

    fn persist(&self) -> Result<(), AppError> {
        save_tasks(&self.path, &self.tasks)
    }
}
