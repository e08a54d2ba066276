//! Watchly command line front end
//!
//! Browses the watch face catalog, fetches images through the disk cache
//! and runs the premium gate, printing what the app would show.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use watchly::entitlement::{LogPaywall, StoredEntitlement};
use watchly::{
    asset_cache_from_config, catalog_from_config, settings_sections, AppConfig, AppState,
    AssetKey, EntitlementGate, EntitlementState, Selection, TileLoader,
};

/// Watch face gallery - browse, preview and save watch faces
#[derive(Parser, Debug)]
#[command(name = "watchly")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory for cached images
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Firebase project id
    #[arg(long)]
    project: Option<String>,

    /// Firebase Storage bucket
    #[arg(long)]
    bucket: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all categories
    Categories,
    /// Resolve a single asset key
    Fetch {
        key: String,
        /// Write the image to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Load the tiles of a category
    Browse {
        category: String,
        /// Load every item instead of the first row
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Select a watch face (1-based item number) and save it
    Select {
        category: String,
        item: u32,
        /// Destination file or directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Restore purchases
    Restore,
    /// Present the premium paywall
    Upgrade,
    /// Show the settings menu
    Settings,
}

#[tokio::main]
async fn main() {
    // Set RUST_LOG to control the level, e.g. RUST_LOG=watchly=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        log::error!("Application error: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(dir) = &args.cache_dir {
        config.cache_dir = dir.clone();
    }
    if let Some(project) = &args.project {
        config.project_id = project.clone();
    }
    if let Some(bucket) = &args.bucket {
        config.storage_bucket = bucket.clone();
    }
    config
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args);
    let mut state = AppState::new(EntitlementState::load(&config.preferences_path));

    let gate = EntitlementGate::new(
        Arc::new(StoredEntitlement::new(&config.preferences_path)),
        Arc::new(LogPaywall),
        &config.paywall_event,
    );

    match args.command {
        Command::Categories => {
            state.load_categories(&catalog_from_config(&config)).await;
            if state.categories().is_empty() {
                println!("No categories available");
            }
            for category in state.categories() {
                let badge = if state.shows_premium_badge(category) {
                    " [premium]"
                } else {
                    ""
                };
                let see_all = if category.has_see_all(config.max_row_items) {
                    format!("  (see all {})", category.items_count)
                } else {
                    String::new()
                };
                println!(
                    "{}{} - {} items{}",
                    category.title, badge, category.items_count, see_all
                );
            }
        }

        Command::Fetch { key, out } => {
            let cache = asset_cache_from_config(&config);
            let key = AssetKey::new(key);
            let bytes = cache
                .try_resolve(&key)
                .await
                .with_context(|| format!("Failed to fetch {}", key))?;

            match out {
                Some(path) => {
                    tokio::fs::write(&path, &bytes)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("{} -> {} ({} bytes)", key, path.display(), bytes.len());
                }
                None => println!(
                    "{} ({} bytes, cached at {})",
                    key,
                    bytes.len(),
                    cache.path(&key).display()
                ),
            }
        }

        Command::Browse { category, all } => {
            state.load_categories(&catalog_from_config(&config)).await;
            let Some(category) = state.category(&category).cloned() else {
                bail!("Unknown category: {}", category);
            };

            let keys = if all {
                category.all_keys()
            } else {
                category.row_keys(config.max_row_items)
            };

            let cache = Arc::new(asset_cache_from_config(&config));
            let (loader, mut results) = TileLoader::new(cache);
            let generation = 1;
            let requested = loader.request_all(keys, generation);
            drop(loader);

            for _ in 0..requested {
                let Some(tile) = results.recv().await else {
                    break;
                };
                if tile.generation != generation {
                    continue;
                }
                match tile.bytes {
                    Some(bytes) => println!("{}: {} bytes", tile.key, bytes.len()),
                    None => println!("{}: placeholder", tile.key),
                }
            }
        }

        Command::Select {
            category,
            item,
            out,
        } => {
            if item == 0 {
                bail!("Item numbers start at 1");
            }
            state.load_categories(&catalog_from_config(&config)).await;
            let Some(category) = state.category(&category).cloned() else {
                bail!("Unknown category: {}", category);
            };
            if item > category.items_count {
                bail!(
                    "{} only has {} items",
                    category.title,
                    category.items_count
                );
            }

            let selection = state.select_watch_face(&gate, &category, item - 1).await;
            if selection == Selection::Denied {
                println!("{} is a premium category. Upgrade to unlock it.", category.title);
                return Ok(());
            }

            let cache = asset_cache_from_config(&config);
            let saved = state
                .save_current_watch_face(&cache, &out)
                .await
                .context("Failed to save watch face")?;
            println!("Saved to {}", saved.display());
        }

        Command::Restore => {
            let premium = state.restore_purchases(&gate).await;
            if premium {
                println!("Premium restored");
            } else {
                println!("No active premium purchase found");
            }
        }

        Command::Upgrade => {
            state.upgrade(&gate);
            println!("Paywall requested: {}", config.paywall_event);
        }

        Command::Settings => {
            for section in settings_sections(&config, state.is_premium_user()) {
                println!("{}", section.header);
                for item in section.items {
                    println!("  [{}] {} ({:?})", item.icon, item.title, item.action);
                }
            }
        }
    }

    Ok(())
}
