use clap::{Args, Parser, Subcommand};
use pexels::{Client, Color, Config, Locale, Orientation, Query, Size};

const CONFIG_LOCATION: &str = "pexels.toml";

#[derive(Parser, Debug)]
#[command(name = "pexels", version, about = "Browse the Pexels photo and video api")]
#[command(after_help = "the api key is read from pexels.toml or the PEXELS_API_KEY environment variable")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    filters: Filters,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Curated photos
    Curated,
    /// Search for photos
    Search { text: String },
    /// A single photo
    Photo { id: u64 },
    /// The photos in a collection
    CollectionPhotos { id: String },
    /// Popular videos
    Popular,
    /// Search for videos
    SearchVideos { text: String },
    /// A single video
    Video { id: u64 },
    /// The videos in a collection
    CollectionVideos { id: String },
    /// Featured collections
    Collections,
    /// Print the default configuration
    DefaultConfig,
}

#[derive(Args, Debug, Default)]
struct Filters {
    #[arg(long, global = true)]
    page: Option<u32>,
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=80))]
    per_page: Option<u32>,
    /// landscape, portrait or square
    #[arg(long, global = true)]
    orientation: Option<Orientation>,
    /// large, medium or small
    #[arg(long, global = true)]
    size: Option<Size>,
    /// A named color or a hex code
    #[arg(long, global = true)]
    color: Option<Color>,
    /// e.g. en-US
    #[arg(long, global = true)]
    locale: Option<Locale>,
    #[arg(long, global = true)]
    min_width: Option<u32>,
    #[arg(long, global = true)]
    max_width: Option<u32>,
    #[arg(long, global = true)]
    min_height: Option<u32>,
    #[arg(long, global = true)]
    max_height: Option<u32>,
    /// Seconds
    #[arg(long, global = true)]
    min_duration: Option<u32>,
    /// Seconds
    #[arg(long, global = true)]
    max_duration: Option<u32>,
}

impl Filters {
    fn into_query(self) -> Query {
        let mut query = Query::default();

        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = self.$field {
                        query = query.$field(value);
                    }
                )*
            };
        }

        apply! {
            page, per_page, orientation, size, color, locale,
            min_width, max_width, min_height, max_height, min_duration, max_duration,
        }
        query
    }
}

async fn load_config() -> anyhow::Result<Config> {
    if !std::path::Path::new(CONFIG_LOCATION).exists() {
        return Ok(Config::from_env());
    }
    Config::load(CONFIG_LOCATION).await
}

fn init_logger(config: &Config) -> anyhow::Result<()> {
    std::env::set_var("RUST_LOG", format!("pexels={}", config.log_level.as_str()));

    let opts = alto_logger::Options::default()
        .with_time(alto_logger::options::TimeConfig::date_time_format("%c"));
    alto_logger::init(alto_logger::TermLogger::new(opts)?)
        .map_err(|err| anyhow::anyhow!("cannot initialize the logger: {:?}", err))?;
    log::set_max_level(config.log_level.into());
    Ok(())
}

async fn fetch(client: &Client, command: Command, query: Query) -> anyhow::Result<String> {
    fn pretty<T: serde::Serialize>(item: &T) -> anyhow::Result<String> {
        serde_json::to_string_pretty(item).map_err(Into::into)
    }

    match command {
        Command::Curated => pretty(&client.curated_photos(&query).await?),
        Command::Search { text } => pretty(&client.search_photos(&text, &query).await?),
        Command::Photo { id } => pretty(&client.photo(id).await?),
        Command::CollectionPhotos { id } => pretty(&client.collection_photos(&id, &query).await?),
        Command::Popular => pretty(&client.popular_videos(&query).await?),
        Command::SearchVideos { text } => pretty(&client.search_videos(&text, &query).await?),
        Command::Video { id } => pretty(&client.video(id).await?),
        Command::CollectionVideos { id } => pretty(&client.collection_videos(&id, &query).await?),
        Command::Collections => pretty(&client.collections(&query).await?),
        Command::DefaultConfig => Ok(Config::default_config().trim_end().to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli { command, filters } = Cli::parse();

    if command == Command::DefaultConfig {
        println!("{}", Config::default_config().trim_end());
        return Ok(());
    }

    let config = load_config().await?;
    init_logger(&config)?;

    let client = Client::from_config(&config);
    anyhow::ensure!(
        client.has_api_key(),
        "no api key. set `api_key` in '{}' or {}",
        CONFIG_LOCATION,
        pexels::config::API_KEY_ENV
    );

    let output = fetch(&client, command, filters.into_query()).await?;
    println!("{}", output);

    if let Some(rate) = client.rate_limit() {
        log::info!("{} of {} requests left", rate.remaining, rate.limit);
    }
    Ok(())
}
