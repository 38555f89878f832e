use anyhow::Result;
use owo_colors::OwoColorize;
use todir_core::store::{self, TodoStore};

pub fn run(reference: &str) -> Result<()> {
    let store = TodoStore::from_config()?;
    let todos = store.todos()?;
    let local = store::resolve(&todos, reference)?;

    let summary = local.todo.summary.clone();
    store.delete(&local.todo.id)?;

    println!("{}", format!("  Removed: {summary}").red());
    Ok(())
}
