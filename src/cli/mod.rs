pub mod dashboard;
pub mod logs;
pub mod output;
pub mod session;
pub mod team;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard::{process_dashboard_command, DashboardCommand};
use logs::{process_logs_command, process_new_command, process_show_command, LogsCommand, NewCommand};
use session::SessionCommand;
use team::{process_review_command, process_team_command, ReviewCommand, TeamCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    auth::{Authenticator, SessionAuthenticator},
    store::data_source::{Fixture, MemoryStore},
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::enable_logging,
        time::DateStyle,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Worklog", version, long_about = None)]
#[command(about = "Track daily work and review your team's logs", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Json fixture to start from instead of the built in sample data"
    )]
    data: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommand),
    #[command(about = "Overview of your latest log, productivity and recent activity")]
    Dashboard {
        #[command(flatten)]
        command: DashboardCommand,
    },
    #[command(about = "List your work logs")]
    Logs {
        #[command(flatten)]
        command: LogsCommand,
    },
    #[command(about = "Show a single log of yours")]
    Show { log_id: String },
    #[command(about = "Log today's work")]
    New {
        #[command(flatten)]
        command: NewCommand,
    },
    #[command(about = "Logs of your team. Managers only")]
    Team {
        #[command(flatten)]
        command: TeamCommand,
    },
    #[command(about = "Read and give feedback on a team log. Managers only")]
    Review {
        #[command(flatten)]
        command: ReviewCommand,
    },
    #[command(about = "Print the data set as json")]
    Export {
        #[arg(long, help = "Write into a file instead of stdout")]
        out: Option<PathBuf>,
    },
}

/// Everything a command needs. Data is loaded fresh for each process, nothing written into the
/// store outlives it.
pub struct AppContext {
    pub store: MemoryStore,
    pub auth: Box<dyn Authenticator>,
    pub clock: Box<dyn Clock>,
    pub date_style: DateStyle,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;
    enable_logging(&app_dir.join("logs"), logging_level, args.log)?;

    let store = match &args.data {
        Some(path) => Fixture::load(path).await?.into(),
        None => MemoryStore::seeded(),
    };
    debug!("Using application directory {app_dir:?}");

    let mut context = AppContext {
        store,
        auth: Box::new(SessionAuthenticator::new(&app_dir)),
        clock: Box::new(DefaultClock),
        date_style: args.date_style,
    };

    match args.commands {
        Commands::Session(command) => session::process_session_command(&context, command).await,
        Commands::Dashboard { command } => process_dashboard_command(&context, command).await,
        Commands::Logs { command } => process_logs_command(&context, command).await,
        Commands::Show { log_id } => process_show_command(&context, &log_id).await,
        Commands::New { command } => process_new_command(&mut context, command).await,
        Commands::Team { command } => process_team_command(&context, command).await,
        Commands::Review { command } => process_review_command(&mut context, command).await,
        Commands::Export { out } => {
            let fixture = context.store.to_fixture();
            match out {
                Some(path) => fixture.save(&path).await?,
                None => println!("{}", serde_json::to_string_pretty(&fixture)?),
            }
            Ok(())
        }
    }
}
