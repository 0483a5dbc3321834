use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, ColorChoice, Parser, Subcommand};
use console::style;
use dialoguer::{Confirm, Input};
use projdex_core::{report, BootstrapAction, Scanner, Settings, Status};
use tracing::level_filters::LevelFilter;

/// A CLI tool that inventories local project directories and generates an
/// HTML index of what it finds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Set the verbosity level. Use -v for debug, -vv for trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Control when to use color output.
    #[arg(long, value_name = "WHEN", global = true, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initializes the configuration file interactively.
    Init,
    /// Updates the configuration interactively.
    Config,
    /// Scan the projects directory and write the HTML index.
    #[command(visible_alias = "i")]
    Index {
        /// Write the report to this file instead of the configured one.
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the records as JSON to stdout instead of writing HTML.
        #[arg(long)]
        json: bool,
    },
    /// Scan and print the project inventory to the terminal.
    #[command(visible_alias = "l")]
    List,
    /// Fill in missing metadata (README, .gitignore, git repo) for a project.
    #[command(visible_alias = "b")]
    Bootstrap {
        /// The name of the project directory to bootstrap.
        #[arg(required = true)]
        name: String,

        /// Also create and push a remote repository via the gh CLI.
        #[arg(long)]
        remote: bool,
    },
    /// Show the configuration paths being used.
    Paths,

    /// Add or remove a project from the exclusion list.
    #[command(visible_alias = "e")]
    Exclude {
        /// The name of the project to add or remove.
        project_name: String,

        /// Remove the project from the exclusion list.
        #[arg(long, short)]
        remove: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.color);

    match &cli.command {
        Commands::Init => return handle_init(),
        Commands::Config => return handle_config(),
        Commands::Exclude { project_name, remove } => return handle_exclude(project_name, *remove),
        _ => {}
    }

    let settings =
        Settings::new().context("Failed to load settings. Try running 'projdex init'")?;

    match cli.command {
        Commands::Index { output, json } => handle_index(settings, output, json)?,
        Commands::List => handle_list(Scanner::new(settings))?,
        Commands::Bootstrap { name, remote } => {
            handle_bootstrap(Scanner::new(settings), &name, remote)?
        }
        Commands::Paths => handle_paths(&settings)?,
        _ => unreachable!(),
    }

    Ok(())
}

fn init_tracing(verbosity: u8, color: ColorChoice) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(color != ColorChoice::Never)
        .init();
}

fn handle_init() -> Result<()> {
    println!("{}", style("Welcome to projdex setup!").bold());
    let config_path = Settings::config_path()?;
    if config_path.exists() {
        let overwrite = Confirm::new()
            .with_prompt("A configuration file already exists. Do you want to overwrite it?")
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Initialization cancelled.");
            return Ok(());
        }
    }
    let new_settings = interactive_config_update(None)?;
    save_settings(&new_settings)?;
    println!(
        "\n{}",
        style("Configuration saved successfully!").green().bold()
    );
    Ok(())
}

fn handle_config() -> Result<()> {
    println!("{}", style("Updating projdex configuration...").bold());
    let existing_settings = Settings::new().context("Failed to load existing settings.")?;
    let new_settings = interactive_config_update(Some(&existing_settings))?;
    save_settings(&new_settings)?;
    println!(
        "\n{}",
        style("Configuration updated successfully!").green().bold()
    );
    Ok(())
}

fn handle_index(mut settings: Settings, output: Option<PathBuf>, json: bool) -> Result<()> {
    if let Some(output) = output {
        settings.output_file = output;
    }
    let scanner = Scanner::new(settings);

    if json {
        let records = scanner
            .scan_projects()
            .context("The project scan failed")?;
        println!("{}", report::render_json(&records)?);
        return Ok(());
    }

    let records = scanner.write_report().context("The project scan failed")?;
    println!(
        "Indexed {} project(s) into '{}'.",
        style(records.len()).bold(),
        style(scanner.settings().output_file.display()).yellow()
    );
    Ok(())
}

fn handle_list(scanner: Scanner) -> Result<()> {
    let mut records = scanner.scan_projects().context("The project scan failed")?;
    if records.is_empty() {
        println!("No projects found.");
        return Ok(());
    }
    records.sort_by_key(|record| record.name.to_lowercase());

    println!("{}", style("Projects:").bold());
    for record in records {
        let status = match record.status {
            Status::Active => style(record.status).green(),
            Status::Maintenance => style(record.status).yellow(),
            Status::Archived => style(record.status).red(),
            Status::Unknown => style(record.status).dim(),
        };
        let last_modified = record
            .last_modified
            .map(|date| date.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        println!(
            "- {:<30} {:<36} {:<12} {:<12} {}",
            style(&record.name).cyan(),
            record.project_type,
            record.language,
            status,
            last_modified
        );
    }
    Ok(())
}

fn handle_bootstrap(scanner: Scanner, name: &str, remote: bool) -> Result<()> {
    let actions = scanner
        .bootstrap_project(name, remote)
        .with_context(|| format!("Failed to bootstrap project '{}'", name))?;

    if actions.is_empty() {
        println!("Project '{}' already has all its metadata.", name);
        return Ok(());
    }
    println!("Bootstrapped project '{}':", style(name).cyan());
    for action in actions {
        let line = match action {
            BootstrapAction::WroteReadme => "wrote stub README.md",
            BootstrapAction::WroteIgnoreFile => "wrote .gitignore from template",
            BootstrapAction::InitializedRepo => "initialized git repository",
            BootstrapAction::CreatedRemote => "created and pushed remote repository",
        };
        println!("- {}", line);
    }
    Ok(())
}

fn handle_paths(settings: &Settings) -> Result<()> {
    println!("{}", style("Configuration paths:").bold());
    println!(
        "- Projects directory: {}",
        style(settings.projects_dir.display()).yellow()
    );
    println!(
        "- Output file:        {}",
        style(settings.output_file.display()).yellow()
    );
    println!(
        "- Config file:        {}",
        style(Settings::config_path()?.display()).yellow()
    );
    Ok(())
}

fn interactive_config_update(existing: Option<&Settings>) -> Result<Settings> {
    let theme = dialoguer::theme::ColorfulTheme::default();
    let home_dir = std::env::var("HOME").context("Could not find HOME directory")?;

    let projects_dir: String = Input::with_theme(&theme)
        .with_prompt("Enter the path to your projects directory")
        .default(existing.map_or_else(
            || format!("{}/projects", home_dir),
            |s| s.projects_dir.to_string_lossy().to_string(),
        ))
        .interact_text()?;

    let output_file: String = Input::with_theme(&theme)
        .with_prompt("Where should the HTML index be written?")
        .default(existing.map_or_else(
            || "project_index.html".to_string(),
            |s| s.output_file.to_string_lossy().to_string(),
        ))
        .interact_text()?;

    let active_days: u64 = Input::with_theme(&theme)
        .with_prompt("Projects are 'Active' if touched within how many days?")
        .default(existing.map_or(90, |s| s.active_days))
        .interact_text()?;

    let archive_days: u64 = Input::with_theme(&theme)
        .with_prompt("Projects are 'Archived' after how many days?")
        .default(existing.map_or(365, |s| s.archive_days))
        .interact_text()?;

    Ok(Settings {
        projects_dir: projects_dir.into(),
        output_file: output_file.into(),
        active_days,
        archive_days,
        exclude: existing.map_or_else(Vec::new, |s| s.exclude.clone()),
    })
}

fn handle_exclude(project_name: &str, remove: bool) -> Result<()> {
    let mut settings = Settings::new().unwrap_or_default();

    if remove {
        if let Some(pos) = settings.exclude.iter().position(|p| p == project_name) {
            settings.exclude.remove(pos);
            println!(
                "Project '{}' has been removed from the exclusion list.",
                style(project_name).yellow()
            );
        } else {
            println!(
                "Project '{}' was not on the exclusion list. No changes made.",
                style(project_name).yellow()
            );
            return Ok(());
        }
    } else {
        if settings.exclude.iter().any(|p| p == project_name) {
            println!(
                "Project '{}' is already on the exclusion list.",
                style(project_name).yellow()
            );
            return Ok(());
        }
        settings.exclude.push(project_name.to_string());
        println!(
            "Project '{}' has been added to the exclusion list.",
            style(project_name).yellow()
        );
    }

    save_settings(&settings).context("Failed to save updated settings")
}

/// Helper to serialize and save settings to the config file.
fn save_settings(settings: &Settings) -> Result<()> {
    let path = Settings::config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Could not create config directory")?;
    }
    let toml_string =
        toml::to_string_pretty(settings).context("Could not serialize settings to TOML")?;
    fs::write(&path, toml_string)
        .with_context(|| format!("Could not write config to '{}'", path.display()))?;
    Ok(())
}
