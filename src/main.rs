use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use serde::Serialize;

use seriesview::{
    config::AppConfig,
    config_persistence::{
        default_config_path, load_config_file, persist_config_file, resolve_state_path,
        JsonFileStatePersister,
    },
    protocol::{
        parse_action, Action, CalendarAction, DaysCountPayload, IncludeUnmonitoredPayload,
        SeriesIndexAction,
    },
    sections::default_section_registry,
    selectors::{select_calendar_page, select_series_index},
    series::{find_filter_preset, series_filter_presets, series_predicates, SeriesRecord},
    store::Store,
    view::{PresetName, PresetOptionValue},
};

/// Sort, filter and display settings for a series library.
#[derive(Parser)]
#[command(name = "seriesview", version)]
struct Args {
    /// Path to config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the persisted state file.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Raise log verbosity; repeat for more.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the filtered and sorted series index.
    View {
        /// JSON array of series records.
        #[arg(long)]
        series: PathBuf,
    },
    /// Apply JSON actions; `-` reads one action per line from stdin.
    Dispatch {
        #[arg(required = true)]
        actions: Vec<String>,
    },
    /// Set one poster or overview option, e.g. `preset poster size small`.
    Preset {
        preset: PresetArg,
        option: String,
        /// `true` or `false` for toggles, otherwise a size such as `small`.
        value: String,
    },
    /// Apply a named filter, or list the available filters.
    Filter { preset: Option<String> },
    /// Update and print calendar page settings.
    Calendar {
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        unmonitored: Option<bool>,
        /// JSON array of series records, used only to report whether any exist.
        #[arg(long)]
        series: Option<PathBuf>,
    },
    /// Print the persisted state document.
    State,
    /// Print the default settings and persisted paths of every section.
    Defaults,
    /// Read or change config.toml.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
    SetColorImpaired { enabled: bool },
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Poster,
    Overview,
}

impl From<PresetArg> for PresetName {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Poster => PresetName::Poster,
            PresetArg::Overview => PresetName::Overview,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_series(path: &Path) -> Result<Vec<SeriesRecord>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    let series: Vec<SeriesRecord> = serde_json::from_str(&content)
        .map_err(|err| format!("failed to parse {}: {}", path.display(), err))?;
    debug!("Loaded {} series from {}", series.len(), path.display());
    Ok(series)
}

fn read_actions(arguments: &[String]) -> Result<Vec<Action>, Box<dyn std::error::Error>> {
    let mut actions = Vec::new();
    for argument in arguments {
        if argument == "-" {
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                actions.push(parse_action(&line)?);
            }
        } else {
            actions.push(parse_action(argument)?);
        }
    }
    Ok(actions)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Trace);
    clog.init();

    let config_path = args
        .config
        .clone()
        .or_else(default_config_path)
        .ok_or("could not determine a config directory; pass --config")?;
    let config = load_config_file(&config_path);
    log::set_max_level(config.logging.level.raised_by(args.verbose).level_filter());

    let state_path = resolve_state_path(&config, args.state.as_deref())
        .ok_or("could not determine a data directory; pass --state")?;
    debug!("Using state file {}", state_path.display());
    let mut store = Store::rehydrate(JsonFileStatePersister::new(state_path));
    let ui = config.ui_settings();

    match args.command {
        Command::View { series } => {
            let records = load_series(&series)?;
            let state = store.state();
            let view = select_series_index(&state.series_index, &records, &series_predicates(), ui);
            print_json(&view)?;
        }
        Command::Dispatch { actions } => {
            for action in read_actions(&actions)? {
                info!("Applying {} action", action.section());
                store.dispatch(action);
            }
            print_json(&store.state().persisted_document()?)?;
        }
        Command::Preset {
            preset,
            option,
            value,
        } => {
            let value = PresetOptionValue::parse(&value);
            let action = SeriesIndexAction::preset_option(preset.into(), &option, value)
                .ok_or_else(|| format!("'{}' is not a valid option for this preset", option))?;
            let state = store.dispatch(action.into());
            match preset {
                PresetArg::Poster => print_json(&state.series_index.poster_options)?,
                PresetArg::Overview => print_json(&state.series_index.overview_options)?,
            }
        }
        Command::Filter { preset: None } => {
            for preset in series_filter_presets() {
                println!("{:<12} {}", preset.key, preset.label);
            }
        }
        Command::Filter {
            preset: Some(preset),
        } => {
            let preset =
                find_filter_preset(&preset).ok_or_else(|| format!("unknown filter '{}'", preset))?;
            let state = store.dispatch(SeriesIndexAction::SetFilter(preset.spec).into());
            print_json(&state.series_index.filter_spec())?;
        }
        Command::Calendar {
            days,
            unmonitored,
            series,
        } => {
            if let Some(day_count) = days {
                store.dispatch(CalendarAction::SetDaysCount(DaysCountPayload { day_count }).into());
            }
            if let Some(unmonitored) = unmonitored {
                store.dispatch(
                    CalendarAction::SetIncludeUnmonitored(IncludeUnmonitoredPayload { unmonitored })
                        .into(),
                );
            }
            let series_count = match series {
                Some(path) => load_series(&path)?.len(),
                None => 0,
            };
            print_json(&select_calendar_page(&store.state().calendar, series_count, ui))?;
        }
        Command::State => print_json(&store.state().persisted_document()?)?,
        Command::Defaults => {
            let sections: serde_json::Map<String, serde_json::Value> = default_section_registry()
                .iter()
                .map(|section| {
                    (
                        section.id.to_string(),
                        serde_json::json!({
                            "defaults": section.default_state(),
                            "persistedPaths": section.persisted_paths,
                        }),
                    )
                })
                .collect();
            print_json(&sections)?;
        }
        Command::Config { command } => run_config_command(&command, config, &config_path)?,
    }

    Ok(())
}

fn run_config_command(
    command: &ConfigCommand,
    mut config: AppConfig,
    config_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ConfigCommand::Show => print_json(&config),
        ConfigCommand::SetColorImpaired { enabled } => {
            config.ui.enable_color_impaired_mode = *enabled;
            persist_config_file(&config, config_path);
            info!("Updated {}", config_path.display());
            print_json(&config)
        }
    }
}
