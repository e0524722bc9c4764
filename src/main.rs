use std::env;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use timer_notification::notification_list::to_json_pretty;
use timer_notification::{load_notification_list, CliConfig, FileSystem, Notification};

const USAGE: &str = "usage: timer-notification [default | normalize <file> | watch <file>]";

fn main() -> ExitCode {
    env_logger::init();

    let config = CliConfig::from_env();
    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = match args.as_slice() {
        [] | ["default"] => print_default(&config),
        ["normalize", file] => print_list(Path::new(file), &config),
        ["watch", file] => watch(Path::new(file), &config),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_default(config: &CliConfig) -> Result<(), Box<dyn Error>> {
    let notification = Notification::default();
    let output = if config.pretty {
        serde_json::to_string_pretty(&notification)?
    } else {
        notification.to_json()?
    };
    println!("{}", output);
    Ok(())
}

fn require_file(path: &Path) -> Result<(), Box<dyn Error>> {
    if FileSystem::file_exists(path) {
        Ok(())
    } else {
        Err(format!("no such file: {}", path.display()).into())
    }
}

fn print_list(path: &Path, config: &CliConfig) -> Result<(), Box<dyn Error>> {
    require_file(path)?;
    let notifications = load_notification_list(path)?;
    let output = if config.pretty {
        to_json_pretty(&notifications)?
    } else {
        serde_json::to_string(&notifications)?
    };
    println!("{}", output);
    Ok(())
}

fn watch(path: &Path, config: &CliConfig) -> Result<(), Box<dyn Error>> {
    print_list(path, config)?;

    // Editors often replace the file, so watch the directory and filter by name
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    log::info!("watching {}", path.display());

    for result in rx.iter() {
        match result {
            Ok(event) if touches_file(&event, path) => {
                std::thread::sleep(config.settle_delay);
                // Collapse the burst of events a single save produces
                while rx.try_recv().is_ok() {}

                if let Err(e) = print_list(path, config) {
                    log::error!("reload of {} failed: {}", path.display(), e);
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("watch error: {}", e),
        }
    }

    Ok(())
}

fn touches_file(event: &Event, path: &Path) -> bool {
    let is_change = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    is_change
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == path.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_require_file_reports_missing_path() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("mash.json");

        let error = require_file(&path).unwrap_err();
        assert!(error.to_string().starts_with("no such file:"));

        fs::write(&path, "[]").unwrap();
        assert!(require_file(&path).is_ok());
        assert!(require_file(temp_dir.path()).is_err());
    }

    #[test]
    fn test_touches_file_matches_changes_to_watched_file() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/schedules/mash.json"));
        assert!(touches_file(&event, Path::new("schedules/mash.json")));

        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/schedules/mash.json"));
        assert!(touches_file(&event, Path::new("mash.json")));
    }

    #[test]
    fn test_touches_file_ignores_other_files_and_removals() {
        let other = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/schedules/boil.json"));
        assert!(!touches_file(&other, Path::new("mash.json")));

        let removed = Event::new(EventKind::Remove(RemoveKind::File))
            .add_path(PathBuf::from("/schedules/mash.json"));
        assert!(!touches_file(&removed, Path::new("mash.json")));
    }
}
