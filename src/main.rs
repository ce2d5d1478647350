use zeitgeist::cli::{Cli, Commands, ConfigAction};
use zeitgeist::clustering::Representative;
use zeitgeist::config::{Config, ConfigValidator};
use zeitgeist::corpus::CsvStore;
use zeitgeist::error::Result;
use zeitgeist::pipeline::{PassOutcome, Pipeline};

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse_args();

    match &cli.command {
        Commands::Process { topic } => {
            let config = load_config(&cli)?;
            let mut pipeline = Pipeline::new(config)?;
            let topical = pipeline.run_topical(topic)?;
            let sentiment = pipeline.run_sentiment(topic)?;
            print_outcome("Topical factions", &topical, cli.json)?;
            print_outcome("Emotional factions", &sentiment, cli.json)?;
        }
        Commands::Cluster {
            topic,
            num_clusters,
            auto,
        } => {
            let mut config = load_config(&cli)?;
            if let Some(n) = *num_clusters {
                config.clustering.num_clusters = n;
            }
            if *auto {
                config.clustering.auto_k = true;
            }
            ConfigValidator::validate(&config)?;
            let mut pipeline = Pipeline::new(config)?;
            let outcome = pipeline.run_topical(topic)?;
            print_outcome("Topical factions", &outcome, cli.json)?;
        }
        Commands::Sentiment { topic } => {
            let config = load_config(&cli)?;
            let mut pipeline = Pipeline::new(config)?;
            let outcome = pipeline.run_sentiment(topic)?;
            print_outcome("Emotional factions", &outcome, cli.json)?;
        }
        Commands::Topics => {
            let config = load_config(&cli)?;
            let store = CsvStore::new(config.storage.data_dir);
            for topic in store.topics()? {
                println!("{topic}");
            }
        }
        Commands::Config { action } => {
            cmd_config(&cli, action)?;
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zeitgeist=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

/// Load the config and overlay per-invocation CLI flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    if let Some(seed) = cli.seed {
        config.sampling.seed = Some(seed);
    }
    if let Some(size) = cli.sample_size {
        config.sampling.sample_size = size;
    }
    if cli.mock {
        config.mock.enabled = true;
    }

    ConfigValidator::validate(&config)?;
    Ok(config)
}

fn print_outcome(title: &str, outcome: &PassOutcome, json: bool) -> Result<()> {
    if json {
        let payload = serde_json::json!({
            "title": title,
            "representatives": outcome.representatives,
            "warnings": outcome.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
        });
        let text =
            serde_json::to_string_pretty(&payload).map_err(|e| zeitgeist::ZeitgeistError::Json {
                source: e,
                context: "Failed to serialize outcome".to_string(),
            })?;
        println!("{text}");
        return Ok(());
    }

    println!("{title}:");
    for rep in &outcome.representatives {
        print_representative(rep);
    }
    for warning in &outcome.warnings {
        println!("  ! {warning}");
    }
    Ok(())
}

fn print_representative(rep: &Representative) {
    println!(
        "  [{} records, confidence {:.2}] {}",
        rep.cardinality, rep.confidence, rep.record.text
    );
    if let Some(username) = &rep.record.username {
        let at_tag = rep.record.at_tag.as_deref().unwrap_or("");
        println!(
            "      - {} {} ({} favs, {} retweets)",
            username, at_tag, rep.record.fav_count, rep.record.ret_count
        );
    }
}

fn cmd_config(cli: &Cli, action: &ConfigAction) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !*force {
                println!("Config already exists at {} (use --force)", path.display());
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| zeitgeist::ZeitgeistError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {}", parent.display()),
                })?;
            }
            let config = Config::default();
            config.save(&path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            let text = toml::to_string_pretty(&config)?;
            println!("{text}");
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
