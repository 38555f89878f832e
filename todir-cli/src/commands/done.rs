use anyhow::Result;
use owo_colors::OwoColorize;
use todir_core::store::{self, TodoStore};

/// Toggle a todo's completion. `undo` puts a finished todo back on the
/// list instead.
pub fn run(reference: &str, undo: bool) -> Result<()> {
    let store = TodoStore::from_config()?;
    let todos = store.todos()?;
    let local = store::resolve(&todos, reference)?;

    let mut todo = local.todo.clone();
    if undo {
        todo.reopen();
    } else {
        todo.complete();
    }
    store.update(&todo.id, &todo)?;

    if undo {
        println!("{}", format!("  Reopened: {}", todo.summary).yellow());
    } else {
        println!("{}", format!("  Completed: {}", todo.summary).green());
    }

    Ok(())
}
