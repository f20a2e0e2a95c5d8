use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use royale_client::config::{load_config_from_path, CONFIG_FILE_PATH};
use royale_client::logger::{self, LogTag};
use royale_client::{ClanSearch, RequestOptions, RoyaleClient};
use serde::Serialize;

/// Environment variable read when neither `--token` nor the config file set one
const TOKEN_ENV: &str = "ROYALE_API_TOKEN";

#[derive(Parser)]
#[command(name = "royale")]
#[command(about = "Query RoyaleAPI for players, clans and tournaments", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, default_value = CONFIG_FILE_PATH)]
    config: String,

    /// API token (overrides the config file and ROYALE_API_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// Only return these fields (comma separated)
    #[arg(long, value_delimiter = ',', global = true)]
    keys: Vec<String>,

    /// Drop these fields from the response (comma separated)
    #[arg(long, value_delimiter = ',', global = true)]
    exclude: Vec<String>,

    /// Enable debug logs for a tag (api, cache, ratelimit, client, config); repeatable
    #[arg(long = "debug", value_name = "TAG", global = true)]
    debug_tags: Vec<String>,

    /// Log everything, including raw payloads
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print cache and request statistics after the command
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Player profile
    Player { tag: String },
    /// Recent battles of a player
    Battles { tag: String },
    /// Upcoming chest cycle of a player
    Chests { tag: String },
    /// Clan profile
    Clan { tag: String },
    /// Current clan war
    War { tag: String },
    /// Finished clan wars
    Warlog { tag: String },
    /// Player leaderboard, global unless a location is given
    TopPlayers { location: Option<String> },
    /// Clan leaderboard, global unless a location is given
    TopClans { location: Option<String> },
    /// Search clans
    SearchClans {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location_id: Option<u64>,
        #[arg(long)]
        min_members: Option<u32>,
        #[arg(long)]
        max_members: Option<u32>,
        #[arg(long)]
        min_score: Option<u32>,
    },
    /// Tournament details
    Tournament { tag: String },
    /// Tournaments open to join
    OpenTournaments,
    /// Most popular decks
    PopularDecks,
    /// Usage statistics of the API token
    KeyStats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config_from_path(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config))?;

    let mut logger_config = config.logging.to_logger_config()?;
    logger_config = logger_config.with_debug_tags(args.debug_tags.iter().map(String::as_str));
    if args.verbose {
        logger_config = logger_config.verbose();
    } else if args.quiet {
        logger_config = logger_config.quiet();
    }
    logger::init(logger_config);

    if let Some(token) = args.token.clone() {
        config.client.token = Some(token);
    } else if config.client.token.is_none() {
        config.client.token = std::env::var(TOKEN_ENV).ok();
    }

    let client = RoyaleClient::new(config.client)?;
    let options = RequestOptions {
        keys: Some(args.keys.clone()),
        exclude: Some(args.exclude.clone()),
    };

    let result = run(&client, args.command, &options).await;

    if args.stats {
        print_json(&client.cache_stats())?;
        if let Some(stats) = client.api_stats() {
            print_json(&stats)?;
        }
        print_json(&client.rate_limits())?;
    }

    if let Err(e) = &result {
        logger::error(LogTag::System, &format!("{} ({})", e, e.error_type()));
    }
    Ok(result?)
}

async fn run(
    client: &RoyaleClient,
    command: Command,
    options: &RequestOptions,
) -> royale_client::ClientResult<()> {
    match command {
        Command::Player { tag } => print_json(&*client.players().get_profile(&tag, options).await?),
        Command::Battles { tag } => {
            print_json(&*client.players().get_battles(&tag, options).await?)
        }
        Command::Chests { tag } => print_json(&*client.players().get_chests(&tag, options).await?),
        Command::Clan { tag } => print_json(&*client.clans().get_data(&tag, options).await?),
        Command::War { tag } => print_json(&*client.clans().get_war(&tag, options).await?),
        Command::Warlog { tag } => print_json(&*client.clans().get_war_log(&tag, options).await?),
        Command::TopPlayers { location } => {
            print_json(&client.players().get_top(location.as_deref(), options).await?)
        }
        Command::TopClans { location } => {
            print_json(&client.clans().get_top(location.as_deref(), options).await?)
        }
        Command::SearchClans {
            name,
            location_id,
            min_members,
            max_members,
            min_score,
        } => {
            let criteria = ClanSearch {
                name,
                location_id,
                min_members,
                max_members,
                min_score,
            };
            print_json(&client.clans().search(&criteria, options).await?)
        }
        Command::Tournament { tag } => {
            print_json(&*client.tournaments().get_info(&tag, options).await?)
        }
        Command::OpenTournaments => print_json(&client.tournaments().get_open_list(options).await?),
        Command::PopularDecks => print_json(&client.get_popular_decks(options).await?),
        Command::KeyStats => print_json(&client.get_key_stats().await?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> royale_client::ClientResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        royale_client::ClientError::parse_error("stdout", format!("failed to render JSON: {}", e))
    })?;
    println!("{}", rendered);
    Ok(())
}
