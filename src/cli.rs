/// CLI argument parsing and command handling.
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::storage::PaletteStorage;
use crate::store::PaletteStore;
use crate::types::{PaletteItem, PaletteSlot};
use crate::{color, share, swatch};

#[derive(Parser)]
#[command(
    name = "swatchr",
    version,
    about = "Swatchr - palette history, favorites and share links"
)]
pub struct Cli {
    /// Database file (defaults to $SWATCHR_DB_PATH or the user data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Origin and path share links point to (defaults to $SWATCHR_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set the current colors, optionally sharing them
    Set {
        #[arg(required = true)]
        colors: Vec<String>,
        #[arg(short = 's', long = "share")]
        share: bool,
    },
    /// Open a share link and record its palette
    Open { link: String },
    /// List shared palettes, most recent first
    History,
    /// List favorite palettes
    Favorites,
    /// Toggle the favorite flag of a listed palette
    Favorite {
        index: usize,
        /// Address the favorites list instead of history
        #[arg(short = 'f', long = "from-favorites")]
        from_favorites: bool,
    },
    /// Remove every palette from history
    ClearHistory,
    /// Write favorites as JSON
    ExportFavorites {
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Replace favorites with a JSON export
    ImportFavorites { path: PathBuf },
    /// Show how colors normalize
    Check {
        #[arg(required = true)]
        colors: Vec<String>,
    },
}

/// Execute a CLI command against a loaded store.
pub fn run<S: PaletteStorage>(
    command: Command,
    store: &mut PaletteStore<S>,
    config: &Config,
) -> Result<()> {
    match command {
        Command::Set { colors, share } => handle_set(colors, share, store, config)?,
        Command::Open { link } => handle_open(&link, store, config)?,
        Command::History => print_items(store.history(), "No shared palettes yet."),
        Command::Favorites => print_items(store.favorites(), "No favorite palettes yet."),
        Command::Favorite {
            index,
            from_favorites,
        } => handle_favorite(index, from_favorites, store)?,
        Command::ClearHistory => {
            store.clear_history()?;
            println!("History cleared.");
        }
        Command::ExportFavorites { output } => handle_export(output, store)?,
        Command::ImportFavorites { path } => handle_import(path, store)?,
        Command::Check { colors } => handle_check(colors, store)?,
    }
    Ok(())
}

fn handle_set<S: PaletteStorage>(
    colors: Vec<String>,
    share: bool,
    store: &mut PaletteStore<S>,
    config: &Config,
) -> Result<()> {
    store.update_colors(colors, share)?;
    if !store.has_valid_colors() {
        println!("No valid colors. Use #RGB or #RRGGBB.");
        return Ok(());
    }
    println!(
        "{}",
        swatch::palette_line(&color::normalize_palette(store.current_colors()))
    );
    if share {
        println!("{}", store.shareable_url(&config.base_url));
    }
    Ok(())
}

fn handle_open<S: PaletteStorage>(
    link: &str,
    store: &mut PaletteStore<S>,
    config: &Config,
) -> Result<()> {
    let colors = share::decode_shared_colors(link);
    if colors.is_empty() {
        println!("Link does not contain a palette.");
        return Ok(());
    }
    handle_set(colors, true, store, config)
}

fn handle_favorite<S: PaletteStorage>(
    index: usize,
    from_favorites: bool,
    store: &mut PaletteStore<S>,
) -> Result<()> {
    let (slot, len) = if from_favorites {
        (PaletteSlot::Favorite(index), store.favorites().len())
    } else {
        (PaletteSlot::History(index), store.history().len())
    };
    if index >= len {
        println!("No palette at index {index}.");
        return Ok(());
    }
    store.toggle_favorite(slot)?;
    println!("Favorites: {}", store.favorites().len());
    Ok(())
}

fn handle_export<S: PaletteStorage>(output: Option<PathBuf>, store: &PaletteStore<S>) -> Result<()> {
    let content = store.export_favorites()?;
    match output {
        Some(path) => {
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} favorites.", store.favorites().len());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn handle_import<S: PaletteStorage>(path: PathBuf, store: &mut PaletteStore<S>) -> Result<()> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let favorites: Vec<PaletteItem> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a favorites export", path.display()))?;
    store.import_favorites(favorites)?;
    println!("Imported {} favorites.", store.favorites().len());
    Ok(())
}

fn handle_check<S: PaletteStorage>(colors: Vec<String>, store: &mut PaletteStore<S>) -> Result<()> {
    store.update_colors(colors, false)?;
    for raw in store.current_colors() {
        match color::normalize_color(raw) {
            Some(normalized) => println!("{raw:>10} -> {}", swatch::palette_line(&[normalized])),
            None => println!("{raw:>10} -> invalid"),
        }
    }
    println!("valid colors: {}", store.has_valid_colors());
    store.reset_colors();
    Ok(())
}

fn print_items(items: &[PaletteItem], empty_message: &str) {
    if items.is_empty() {
        println!("{empty_message}");
        return;
    }
    for (index, item) in items.iter().enumerate() {
        println!("{}", swatch::item_line(index, item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use tempfile::tempdir;

    fn setup() -> (PaletteStore<MemoryStorage>, Config) {
        let config = Config {
            db_path: PathBuf::from("unused.db"),
            base_url: url::Url::parse("https://swatchr.app/").unwrap(),
        };
        (PaletteStore::new(MemoryStorage::new()), config)
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["swatchr", "set", "#fff", "--share", "--db", "x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        assert!(matches!(cli.command, Command::Set { share: true, .. }));
    }

    #[test]
    fn set_with_share_records_history() {
        let (mut store, config) = setup();
        let command = Command::Set {
            colors: vec!["#abc".into(), "bad".into()],
            share: true,
        };
        run(command, &mut store, &config).unwrap();
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].colors, vec!["#AABBCC".to_string()]);
    }

    #[test]
    fn open_records_shared_palette() {
        let (mut store, config) = setup();
        let link = share::shareable_url(&config.base_url, &["#123", "#456"]);
        run(Command::Open { link }, &mut store, &config).unwrap();
        assert_eq!(
            store.history()[0].colors,
            vec!["#112233".to_string(), "#445566".to_string()]
        );
    }

    #[test]
    fn favorite_out_of_range_is_reported() {
        let (mut store, config) = setup();
        let command = Command::Favorite {
            index: 4,
            from_favorites: false,
        };
        run(command, &mut store, &config).unwrap();
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn export_then_import_favorites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        let (mut store, config) = setup();
        store.add_to_history(&["#abc"], true).unwrap();
        store.toggle_favorite(PaletteSlot::History(0)).unwrap();
        run(
            Command::ExportFavorites {
                output: Some(path.clone()),
            },
            &mut store,
            &config,
        )
        .unwrap();

        let (mut other, _) = setup();
        other.add_to_history(&["#AABBCC"], true).unwrap();
        run(Command::ImportFavorites { path }, &mut other, &config).unwrap();
        assert_eq!(other.favorites(), store.favorites());
        assert!(other.history()[0].is_favorite);
    }

    #[test]
    fn import_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(&path, "not json").unwrap();
        let (mut store, config) = setup();
        assert!(run(Command::ImportFavorites { path }, &mut store, &config).is_err());
    }

    #[test]
    fn check_leaves_current_colors_empty() {
        let (mut store, config) = setup();
        let command = Command::Check {
            colors: vec!["#fff".into(), "nope".into()],
        };
        run(command, &mut store, &config).unwrap();
        assert!(store.current_colors().is_empty());
        assert!(store.history().is_empty());
    }
}
