#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{fmt, EnvFilter};

use cocktail_graph::data::{
    apply_ratings, load_measures, load_stock, load_training_set, load_word_list,
};
use cocktail_graph::present::{render_recipe, RecipeNamer};
use cocktail_graph::{mix, Config, GenerationStrategy, IngredientLimit, Trainer};

#[derive(Parser)]
#[command(name = "mixer", version, about = "Invent cocktails from rated recipes")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a rated set and generate recipes
    Generate {
        /// Training set JSON
        #[arg(long)]
        training: PathBuf,

        /// TOML file overriding the default parameters
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bar stock JSON (name -> bool); restricts the ingredients used
        #[arg(long, conflicts_with = "auto_limit")]
        stock: Option<PathBuf>,

        /// Restrict ingredients to an automatic cluster around the nuclei
        #[arg(long)]
        auto_limit: bool,

        /// Generate one recipe per listed base ingredient (comma-separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "base")]
        menu: Option<Vec<String>>,

        /// Keep menu ingredients out of each other's recipes
        #[arg(long, requires = "menu")]
        unique_menu: bool,

        /// Start every recipe from this ingredient
        #[arg(long)]
        base: Option<String>,

        /// Number of recipes (overrides generation.count)
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Measures JSON (name -> unit)
        #[arg(long)]
        measures: Option<PathBuf>,

        /// Adjectives for recipe names, one per line
        #[arg(long)]
        adjectives: Option<PathBuf>,

        /// Nouns for recipe names, one per line
        #[arg(long)]
        nouns: Option<PathBuf>,

        /// Also write the session as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the automatically selected ingredient cluster
    Cluster {
        #[arg(long)]
        training: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Nuclei to grow the cluster from (comma-separated)
        #[arg(long, value_delimiter = ',')]
        menu: Option<Vec<String>>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write collected ratings (one per line) into the training set
    ApplyRatings {
        #[arg(long)]
        training: PathBuf,
        #[arg(long)]
        ratings: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    })
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            training,
            config,
            stock,
            auto_limit,
            menu,
            unique_menu,
            base,
            count,
            seed,
            measures,
            adjectives,
            nouns,
            json,
        } => {
            let mut cfg = load_config(config.as_ref())?;
            if let Some(count) = count {
                cfg.generation.count = count;
            }
            let recipes = load_training_set(&training)?;
            let mut rng = make_rng(seed);

            let limit = if let Some(path) = stock {
                IngredientLimit::Stock(load_stock(path)?)
            } else if auto_limit {
                IngredientLimit::Auto {
                    nuclei: menu.clone(),
                }
            } else {
                IngredientLimit::None
            };
            let strategy = match menu {
                Some(entries) => GenerationStrategy::Menu {
                    entries,
                    unique: unique_menu,
                },
                None => GenerationStrategy::Count {
                    target: cfg.generation.count,
                    start: base,
                },
            };

            let session = mix(&recipes, &limit, &strategy, &cfg, &mut rng)?;

            let measures = match measures {
                Some(path) => load_measures(path)?,
                None => HashMap::new(),
            };
            let namer = RecipeNamer::new(
                adjectives.map(load_word_list).transpose()?.unwrap_or_default(),
                nouns.map(load_word_list).transpose()?.unwrap_or_default(),
            );
            for recipe in &session.recipes {
                let name = namer.name(&mut rng);
                println!("{}", render_recipe(&name, recipe, &measures));
            }

            if let Some(path) = json {
                let body = serde_json::to_string_pretty(&session)?;
                std::fs::write(path, body)?;
            }
        }
        Commands::Cluster {
            training,
            config,
            menu,
            seed,
        } => {
            let cfg = load_config(config.as_ref())?;
            let recipes = load_training_set(&training)?;
            let mut rng = make_rng(seed);
            let graph = Trainer::new(cfg.training.clone())?.train(&recipes, &mut rng)?;
            let cluster = IngredientLimit::Auto { nuclei: menu }.select(&graph, &cfg.cluster)?;
            for (idx, ingredient) in cluster.iter().enumerate() {
                println!("{}. {ingredient}", idx + 1);
            }
        }
        Commands::ApplyRatings { training, ratings } => {
            let updated = apply_ratings(&training, &ratings)?;
            println!("applied {updated} ratings to {}", training.display());
        }
    }

    Ok(())
}
