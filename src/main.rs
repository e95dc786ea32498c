use clap::Parser;
use notepub::application::{
    init::init, ConfigService, NoteService, NoteToggle, Scenario, SyncScenarioService,
};
use notepub::cli::{format_note_detail, format_note_list, format_sync_report, Cli, Commands};
use notepub::domain::PublishState;
use notepub::error::NotepubError;
use notepub::infrastructure::{init_logging, FileSystemRepository, NoteRepository};

fn main() {
    let cli = Cli::parse();

    init_logging(&log_filter());

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// NOTEPUB_LOG, else the store's configured level, else warn
fn log_filter() -> String {
    FileSystemRepository::discover()
        .and_then(|repo| repo.load_config())
        .map(|config| config.get_log_filter())
        .or_else(|_| std::env::var("NOTEPUB_LOG"))
        .unwrap_or_else(|_| "warn".to_string())
}

fn run(cli: Cli) -> Result<(), NotepubError> {
    match cli.command {
        Commands::Init { path } => init(&path),
        Commands::New {
            id,
            content,
            markdown,
        } => {
            let service = NoteService::new(FileSystemRepository::discover()?);
            let note = service.create(&id, &content, markdown)?;
            println!("Created note {}", note.identifier);
            Ok(())
        }
        Commands::Show { id } => {
            let service = NoteService::new(FileSystemRepository::discover()?);
            let note = service.show(&id)?;
            // Listeners do not outlive a process, so nothing is pending here
            let state = PublishState::derive(note.published, false);
            print!("{}", format_note_detail(&note, state));
            Ok(())
        }
        Commands::List => {
            let service = NoteService::new(FileSystemRepository::discover()?);
            let notes = service.list()?;
            println!("{}", format_note_list(&notes).trim_end());
            Ok(())
        }
        Commands::Pin { id, state } => {
            set_toggle(&id, NoteToggle::Pinned, state.is_on(), "Pinned", "Unpinned")
        }
        Commands::Markdown { id, state } => set_toggle(
            &id,
            NoteToggle::Markdown,
            state.is_on(),
            "Markdown enabled for",
            "Markdown disabled for",
        ),
        Commands::Sync { scenario } => {
            let scenario = Scenario::from_file(&scenario)?;
            let service = SyncScenarioService::new(FileSystemRepository::discover()?);
            let report = service.run(&scenario)?;
            print!("{}", format_sync_report(&report));
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                let config = service.list()?;
                println!("publish_base_url = {}", config.publish_base_url);
                println!("log_level = {}", config.log_level);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: notepub config [--list | <key> [<value>]]");
                println!("Valid keys: publish_base_url, log_level, created");
                Ok(())
            }
        }
    }
}

fn set_toggle(
    id: &str,
    toggle: NoteToggle,
    on: bool,
    on_label: &str,
    off_label: &str,
) -> Result<(), NotepubError> {
    let service = NoteService::new(FileSystemRepository::discover()?);
    let (note, changed) = service.set_toggle(id, toggle, on)?;
    let label = if on { on_label } else { off_label };

    if changed {
        println!("{} {}", label, note.identifier);
    } else {
        println!("{} {} (unchanged)", label, note.identifier);
    }
    Ok(())
}
