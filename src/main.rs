//! Mapstyle CLI - Map Style Editor
//!
//! Command-line interface for inspecting and editing style documents.

use clap::Parser;
use env_logger::Env;
use log::info;

use mapstyle::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Mapstyle v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Mapstyle v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    let result = match cmd {
        Commands::New { path, name } => commands::new_style(&path, name.as_deref()),
        Commands::Validate { path } => commands::validate_style(&path),
        Commands::Layers { path, search } => commands::list_layers(&path, &search),
        Commands::Show { path, layer } => commands::show_layer(&path, &layer),
        Commands::Toggle {
            path,
            layer,
            hide,
            output,
        } => commands::toggle_layer(&path, &layer, !hide, output.as_deref()),
        Commands::Set {
            path,
            layer,
            property,
            value,
            output,
        } => commands::set_property(&path, &layer, &property, &value, output.as_deref()),
        Commands::ReplaceColor {
            path,
            from,
            to,
            property,
            output,
        } => commands::replace_color(&path, &from, &to, &property, output.as_deref()),
        Commands::AddLayer {
            path,
            layer_type,
            id,
            source,
            output,
        } => commands::add_layer(
            &path,
            &layer_type,
            id.as_deref(),
            source.as_deref(),
            output.as_deref(),
        ),
    };

    if let Err(err) = &result {
        if let Some(suggestion) = err.recovery_suggestion() {
            eprintln!("hint: {}", suggestion);
        }
    }
    Ok(result?)
}
