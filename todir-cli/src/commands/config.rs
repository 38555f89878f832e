use anyhow::Result;
use owo_colors::OwoColorize;
use todir_core::todir::Todir;
use todir_core::todir_config::TodirConfig;

pub fn run(dir: Option<&str>) -> Result<()> {
    let mut todir = Todir::load()?;

    if let Some(dir) = dir {
        todir.set_todo_dir(dir.into())?;
        println!(
            "{}",
            format!("  Todo directory set to {}", todir.display_path().display()).green()
        );
        return Ok(());
    }

    let config_path = TodirConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Todos:   {}", todir.display_path().display());

    Ok(())
}
