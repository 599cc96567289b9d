//! CLI command definitions and handlers

mod config;
mod connections;
mod danger;
mod doctor;
mod graph;
mod list;
mod menu;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tps::config::UserConfig;
use tps::graph::{Engine, ImageFormat};
use tps::models::AggregationStrategy;
use tps::reference::ReferenceData;
use tracing::debug;

/// Two Point Science - room graphs for Two Point Hospital
#[derive(Parser, Debug)]
#[command(name = "tps")]
#[command(
    version,
    about = "Room graphs, connection counts and illness danger for Two Point Hospital",
    long_about = "Two Point Science looks up hospitals, illnesses and rooms from Two Point \
Hospital and draws the path a patient takes through diagnosis and treatment as a \
Graphviz graph.\n\n\
Run without a subcommand to open the interactive menu.",
    after_help = "\
Examples:
  tps hospitals                              List hospitals
  tps graph \"Grockle Bay\"                    Graph every illness in a hospital
  tps graph \"Grockle Bay\" --room Pharmacy    Only moves through the pharmacy
  tps -d connections Blighton                Room counts, wards split by role
  tps danger Blighton --column 4             Illnesses by death chance"
)]
pub struct Cli {
    /// Split dual-purpose rooms into "(diag)" and "(treat)" nodes
    #[arg(
        long,
        short = 'd',
        global = true,
        visible_alias = "distinct-rooms",
        overrides_with = "no_separate_rooms"
    )]
    pub separate_rooms: bool,

    /// Keep dual-purpose rooms as one node, even if config or env says otherwise
    #[arg(long, global = true, overrides_with = "separate_rooms")]
    pub no_separate_rooms: bool,

    /// Directory for graph sources and images (default: current directory)
    #[arg(long, short = 'g', global = true)]
    pub graph_dir: Option<PathBuf>,

    /// Reference data file to use instead of the built-in dataset
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List hospitals and how many illnesses are recorded for each
    Hospitals,

    /// List illnesses with their diagnosis path and treatment room
    Illnesses {
        /// Only illnesses found in this hospital
        #[arg(long)]
        hospital: Option<String>,
    },

    /// List rooms and what they are used for
    Rooms {
        /// Only rooms used by this hospital's illnesses
        #[arg(long)]
        hospital: Option<String>,
    },

    /// Write a Graphviz graph of patient movement for a hospital
    #[command(after_help = "\
Examples:
  tps graph Blighton                         Whole hospital
  tps graph Blighton --illness \"Light-headedness\"
  tps graph Blighton --room Ward -d          Moves touching the ward
  tps graph Blighton --engine neato --image-format svg
  tps graph Blighton --no-render             Only write the .gv source")]
    Graph {
        /// Hospital name
        hospital: String,

        /// Graph a single illness from the hospital
        #[arg(long, conflicts_with = "room")]
        illness: Option<String>,

        /// Keep only moves into or out of this room
        #[arg(long)]
        room: Option<String>,

        /// Layout engine: dot, neato, sfdp, fdp, circo, twopi
        #[arg(long, value_parser = ["dot", "neato", "sfdp", "fdp", "circo", "twopi"])]
        engine: Option<String>,

        /// Image format: png, pdf, svg
        #[arg(long, value_parser = ["png", "pdf", "svg"])]
        image_format: Option<String>,

        /// Write the DOT source without running Graphviz
        #[arg(long)]
        no_render: bool,
    },

    /// Count how often each room appears on a hospital's patient moves
    Connections {
        /// Hospital name
        hospital: String,

        /// Keep only moves into or out of this room
        #[arg(long)]
        room: Option<String>,

        /// Sort by count or name
        #[arg(long, default_value = "count", value_parser = ["count", "name"])]
        sort: String,

        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Rank a hospital's illnesses by danger
    Danger {
        /// Hospital name
        hospital: String,

        /// Sort column (1 illness, 2 treatment room, 3 difficulty, 4 death chance,
        /// 5 health decline, 6 aggregate)
        #[arg(long, default_value = "6", value_parser = clap::value_parser!(u8).range(1..=6))]
        column: u8,

        /// Aggregation strategy: product, average, blended
        #[arg(long)]
        strategy: Option<String>,

        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Interactive menu
    Menu,

    /// Manage the user config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check the reference data and the Graphviz install
    Doctor,

    /// Show version info
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create a commented example config file
    Init,
    /// Print resolved settings and where they came from
    Show,
}

impl Cli {
    /// Room splitting requested on the command line, if any
    pub fn separate_rooms_flag(&self) -> Option<bool> {
        match (self.separate_rooms, self.no_separate_rooms) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

/// Settings resolved from CLI flags, environment, config file and defaults
pub struct Settings {
    pub data: ReferenceData,
    pub separate_rooms: bool,
    pub graph_dir: PathBuf,
    pub engine: Engine,
    pub image_format: ImageFormat,
    pub strategy: AggregationStrategy,
}

impl Settings {
    /// CLI flags win over everything already merged into `config`
    pub fn resolve(cli: &Cli, config: &UserConfig) -> Result<Self> {
        let data = match cli.data.as_deref().or(config.data_file()) {
            Some(path) => ReferenceData::load(path)
                .with_context(|| format!("Failed to load reference data from {}", path.display()))?,
            None => ReferenceData::builtin().context("Built-in reference data is invalid")?,
        };

        let settings = Self {
            data,
            separate_rooms: cli
                .separate_rooms_flag()
                .unwrap_or_else(|| config.separate_rooms()),
            graph_dir: cli.graph_dir.clone().unwrap_or_else(|| config.graph_dir()),
            engine: config.engine()?,
            image_format: config.image_format()?,
            strategy: config.strategy()?,
        };
        debug!(
            separate_rooms = settings.separate_rooms,
            graph_dir = %settings.graph_dir.display(),
            engine = %settings.engine,
            "Resolved settings"
        );
        Ok(settings)
    }
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    let user_config = UserConfig::load()?;

    if let Some(Commands::Config { action }) = &cli.command {
        return match action {
            ConfigAction::Init => config::init(),
            ConfigAction::Show => config::show(&cli, &user_config),
        };
    }
    if let Some(Commands::Version) = &cli.command {
        println!("tps {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let settings = Settings::resolve(&cli, &user_config)?;

    match cli.command {
        Some(Commands::Hospitals) => list::hospitals(&settings),
        Some(Commands::Illnesses { hospital }) => list::illnesses(&settings, hospital.as_deref()),
        Some(Commands::Rooms { hospital }) => list::rooms(&settings, hospital.as_deref()),
        Some(Commands::Graph {
            hospital,
            illness,
            room,
            engine,
            image_format,
            no_render,
        }) => {
            let engine = match engine {
                Some(engine) => engine.parse()?,
                None => settings.engine,
            };
            let image_format = match image_format {
                Some(format) => format.parse()?,
                None => settings.image_format,
            };
            let target = match (illness, room) {
                (Some(illness), _) => graph::Target::Illness(illness),
                (None, Some(room)) => graph::Target::Room(room),
                (None, None) => graph::Target::Hospital,
            };
            let format = if no_render { None } else { Some(image_format) };
            graph::run(&settings, &hospital, target, engine, format)
        }
        Some(Commands::Connections {
            hospital,
            room,
            sort,
            ascending,
            format,
        }) => connections::run(
            &settings,
            &hospital,
            room.as_deref(),
            &sort,
            ascending,
            &format,
        ),
        Some(Commands::Danger {
            hospital,
            column,
            strategy,
            ascending,
            format,
        }) => {
            let strategy = match strategy {
                Some(strategy) => strategy.parse()?,
                None => settings.strategy,
            };
            danger::run(&settings, &hospital, column, strategy, ascending, &format)
        }
        Some(Commands::Doctor) => doctor::run(&settings),
        Some(Commands::Menu) | None => menu::run(&settings),
        Some(Commands::Config { .. }) | Some(Commands::Version) => Ok(()),
    }
}
