//! Directory-backed todo storage.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::error::{TodirError, TodirResult};
use crate::ics::{generate_ics, parse_todo};
use crate::todir::Todir;
use crate::todo::{Todo, TodoTime};

/// A todo loaded from disk, with file metadata.
#[derive(Debug, Clone)]
pub struct LocalTodo {
    pub todo: Todo,
    pub path: PathBuf,                   // Path to the .ics file
    pub modified: Option<DateTime<Utc>>, // File modification time
}

impl LocalTodo {
    pub fn from_file(path: PathBuf) -> TodirResult<Self> {
        let content = std::fs::read_to_string(&path)?;

        let todo = parse_todo(&content).ok_or_else(|| {
            TodirError::IcsParse(format!("Failed to parse todo from {}", path.display()))
        })?;

        let modified = std::fs::metadata(&path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);

        Ok(LocalTodo { todo, path, modified })
    }

    /// Rewrite the file in place from the current todo value.
    pub fn save(&self) -> TodirResult<()> {
        let ics_content = generate_ics(&self.todo)?;
        std::fs::write(&self.path, ics_content)?;
        Ok(())
    }
}

/// A flat directory of .ics todo files.
#[derive(Debug, Clone)]
pub struct TodoStore {
    dir: PathBuf,
}

impl TodoStore {
    /// Open a store over an explicit directory.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        TodoStore { dir: dir.into() }
    }

    /// Open the store named by the global config.
    pub fn from_config() -> TodirResult<Self> {
        let todir = Todir::load()?;
        Ok(TodoStore { dir: todir.data_path() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every todo, sorted by priority, then due, then summary.
    /// Files that fail to parse are skipped with a warning. A missing
    /// directory is an empty store.
    pub fn todos(&self) -> TodirResult<Vec<LocalTodo>> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Ok(Vec::new());
        };

        let mut todos: Vec<LocalTodo> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "ics"))
            .filter_map(|path| match LocalTodo::from_file(path.clone()) {
                Ok(todo) => Some(todo),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    None
                }
            })
            .collect();

        debug!("Loaded {} todos from {}", todos.len(), self.dir.display());

        todos.sort_by(|a, b| {
            sort_key(&a.todo)
                .cmp(&sort_key(&b.todo))
                .then_with(|| a.todo.summary.cmp(&b.todo.summary))
        });
        Ok(todos)
    }

    /// Write a new todo file. The filename comes from the due date and
    /// summary; collisions get numeric suffixes.
    pub fn create(&self, todo: &Todo) -> TodirResult<LocalTodo> {
        std::fs::create_dir_all(&self.dir)?;

        let content = generate_ics(todo)?;
        let filename = filename_for(todo, &self.dir)?;
        let path = self.dir.join(&filename);

        std::fs::write(&path, content)?;
        debug!("Created {}", path.display());

        let modified = std::fs::metadata(&path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);

        Ok(LocalTodo { todo: todo.clone(), path, modified })
    }

    /// Find a stored todo by id.
    pub fn get(&self, id: &str) -> TodirResult<LocalTodo> {
        self.todos()?
            .into_iter()
            .find(|t| t.todo.id == id)
            .ok_or_else(|| TodirError::TodoNotFound(id.to_string()))
    }

    /// Replace a stored todo. Recreates the file so the filename follows
    /// summary or due-date changes.
    pub fn update(&self, id: &str, todo: &Todo) -> TodirResult<LocalTodo> {
        self.delete(id)?;
        self.create(todo)
    }

    /// Delete a stored todo by id. Deleting an unknown id is a no-op.
    pub fn delete(&self, id: &str) -> TodirResult<()> {
        if let Some(local) = self.todos()?.into_iter().find(|t| t.todo.id == id) {
            std::fs::remove_file(&local.path)?;
            debug!("Deleted {}", local.path.display());
        }
        Ok(())
    }

    /// Remove every todo file in the store. Returns how many went.
    pub fn clear(&self) -> TodirResult<usize> {
        let todos = self.todos()?;
        let count = todos.len();
        for local in todos {
            std::fs::remove_file(&local.path)?;
        }
        Ok(count)
    }
}

fn sort_key(todo: &Todo) -> (u8, NaiveDateTime) {
    let due = todo
        .due
        .map(|d| d.as_datetime())
        .unwrap_or(NaiveDateTime::MAX);
    (todo.priority.rank(), due)
}

/// Resolve a user-facing reference to a stored todo: a 1-based position
/// in the listing, or a unique id prefix.
pub fn resolve<'a>(todos: &'a [LocalTodo], reference: &str) -> TodirResult<&'a LocalTodo> {
    if let Ok(n) = reference.parse::<usize>() {
        if n == 0 || n > todos.len() {
            return Err(TodirError::TodoNotFound(format!(
                "#{} (the list has {})",
                n,
                todos.len()
            )));
        }
        return Ok(&todos[n - 1]);
    }

    let matches: Vec<&LocalTodo> = todos
        .iter()
        .filter(|t| t.todo.id.starts_with(reference))
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(TodirError::TodoNotFound(reference.to_string())),
        _ => Err(TodirError::AmbiguousTodo(
            reference.to_string(),
            matches
                .iter()
                .map(|t| t.todo.summary.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )),
    }
}

// =============================================================================
// Filename generation
// =============================================================================

/// Generate a unique filename for a todo, handling collisions.
fn filename_for(todo: &Todo, dir: &Path) -> TodirResult<String> {
    let base = base_filename(todo);
    let stem = base.trim_end_matches(".ics");

    // Try base filename first
    if !dir.join(&base).exists() || file_has_uid(dir, &base, &todo.id) {
        return Ok(base);
    }

    // Collision - try suffixes
    for n in 2..=100 {
        let suffixed = format!("{}-{}.ics", stem, n);
        if !dir.join(&suffixed).exists() || file_has_uid(dir, &suffixed, &todo.id) {
            return Ok(suffixed);
        }
    }

    Err(TodirError::Store(format!(
        "Too many filename collisions for {}",
        base
    )))
}

fn file_has_uid(dir: &Path, filename: &str, uid: &str) -> bool {
    std::fs::read_to_string(dir.join(filename))
        .ok()
        .and_then(|content| parse_todo(&content))
        .is_some_and(|t| t.id == uid)
}

/// Base filename for a todo.
/// Timed: `YYYY-MM-DDTHHMM__slug.ics`
/// All-day: `YYYY-MM-DD__slug.ics`
/// Repeating: `_repeating__slug.ics`
/// Undated: `_undated__slug.ics`
fn base_filename(todo: &Todo) -> String {
    let slug = slugify(&todo.summary);

    if todo.repeat.is_some() {
        return format!("_repeating__{}.ics", slug);
    }

    match &todo.due {
        Some(TodoTime::Date(d)) => format!("{}__{}.ics", d.format("%Y-%m-%d"), slug),
        Some(TodoTime::DateTime(dt)) => format!("{}__{}.ics", dt.format("%Y-%m-%dT%H%M"), slug),
        None => format!("_undated__{}.ics", slug),
    }
}

pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}
