use aorte::character::save::SaveManager;
use aorte::config::{init_logging, Cli, Commands};
use aorte::errors::AppError;
use aorte::registry::{load_from_dir, Registry};
use aorte::ui::{play, render::save_line, Console};
use clap::Parser;
use log::{error, info};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.subcommand() {
        Commands::Play => load_registry(&cli).and_then(|registry| run_play(&cli, &registry)),
        Commands::ListSaves => list_saves(&cli),
        Commands::Validate => load_registry(&cli).map(|registry| {
            println!(
                "{}: {} items, {} enemies, {} quests",
                cli.data_dir.display(),
                registry.item_count(),
                registry.enemy_count(),
                registry.quest_count()
            );
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_registry(cli: &Cli) -> Result<Registry, AppError> {
    let registry = load_from_dir(&cli.data_dir)?;
    info!(
        "Loaded {} items, {} enemies, {} quests from {}",
        registry.item_count(),
        registry.enemy_count(),
        registry.quest_count(),
        cli.data_dir.display()
    );
    Ok(registry)
}

fn run_play(cli: &Cli, registry: &Registry) -> Result<(), AppError> {
    let saves = SaveManager::new(cli.resolve_save_dir())?;
    let mut rng = cli.rng();
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    play(&mut console, registry, &saves, &mut rng)?;
    Ok(())
}

fn list_saves(cli: &Cli) -> Result<(), AppError> {
    let saves = SaveManager::new(cli.resolve_save_dir())?;
    let listing = saves.list()?;
    if listing.is_empty() {
        println!("No save files in {}", saves.save_dir().display());
    }
    for info in &listing {
        println!("{}", save_line(info));
    }
    Ok(())
}
