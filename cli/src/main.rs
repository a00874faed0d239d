use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use armory_engine::content;
use armory_engine::display;
use armory_engine::template::{scan, TemplateResolver};
use armory_engine::{
    ArmoryConfig, EnrichmentPipeline, ItemRecord, SearchEngine, SharedReader, SnapshotReader,
    SqliteSnapshot,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Cmd {
    /// Search items by id or by name prefix
    Search {
        /// An item id, or words matched against item names
        #[arg(required = true)]
        query: Vec<String>,
        /// Maximum number of name matches (defaults to search.limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Print enriched records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one item with its resolved spell effects
    Item {
        entry: i64,
        /// Print the enriched record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a spell description
    Spell {
        id: u32,
        /// List the placeholder tokens of the raw description as JSON
        #[arg(long)]
        tokens: bool,
        /// Print the text after every substitution pass
        #[arg(long)]
        trace: bool,
    },
    /// Row counts of the opened snapshot
    Stats,
}

#[derive(Parser)]
#[command(name = "armory")]
#[command(about = "Item and spell lookup over a read-only snapshot")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Snapshot database (overrides database.path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Use the built-in sample snapshot
    #[arg(long, global = true, conflicts_with = "db")]
    sample: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ArmoryConfig> {
    match path {
        Some(path) => ArmoryConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ArmoryConfig::default()),
    }
}

fn open_snapshot(cli: &Cli, config: &ArmoryConfig) -> anyhow::Result<Arc<SqliteSnapshot>> {
    let snapshot = if cli.sample {
        content::open_sample().context("loading sample snapshot")?
    } else {
        let Some(path) = cli.db.as_ref().or(config.database.path.as_ref()) else {
            bail!("no snapshot given; pass --db <path>, set database.path, or use --sample");
        };
        SqliteSnapshot::open(path, config.database.tables.clone())
            .with_context(|| format!("opening snapshot {}", path.display()))?
    };
    Ok(Arc::new(snapshot))
}

fn print_item(item: &ItemRecord, resolver: &TemplateResolver) {
    println!("{} [{}]", item.name, display::quality_name(item.quality));
    println!("  entry {}", item.entry);
    if let Some(bonding) = item.bonding.and_then(display::bonding_name) {
        println!("  {}", bonding);
    }
    if let Some(slot) = item.inventory_type.filter(|t| *t > 0) {
        println!("  {}", display::inventory_type_name(slot));
    }
    if let Some(armor) = item.armor.filter(|a| *a > 0) {
        println!("  {} Armor", armor);
    }
    for line in display::damage_lines(item) {
        println!("  {}", line);
    }
    if let Some(speed) = display::weapon_speed(item) {
        println!("  Speed {}", speed);
    }
    if let Some(dps) = display::dps_label(item) {
        println!("  ({})", dps);
    }
    for line in display::stat_lines(item)
        .into_iter()
        .chain(display::resistance_lines(item))
    {
        println!("  {}", line);
    }
    if let Some(classes) = item.allowable_class.and_then(display::allowable_classes) {
        println!("  Classes: {}", classes);
    }
    if let Some(level) = item.required_level.filter(|l| *l > 0) {
        println!("  Requires Level {}", level);
    }
    for slot in display::displayed_spell_refs(item) {
        let text = match item.attached_spell(slot.spell_id) {
            Some(spell) => resolver.resolve(spell),
            None => format!("spell {}", slot.spell_id),
        };
        let mut line = format!("  {}: {}", display::slot_summary(slot), text);
        if let Some(chance) = display::proc_chance_percent(slot, item.delay_ms) {
            line.push_str(&format!(" ({:.1}% chance)", chance));
        }
        println!("{}", line);
    }
    if let Some(description) = item.description.as_deref() {
        println!("  \"{}\"", description);
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(?config, "configuration");
    let snapshot = open_snapshot(&cli, &config)?;
    let reader: SharedReader = snapshot.clone();

    match cli.cmd {
        Cmd::Search { query, limit, json } => {
            let query = query.join(" ");
            let limit = limit.unwrap_or(config.search.limit);
            let items = SearchEngine::new(reader.clone()).try_search(&query, limit)?;
            let items = EnrichmentPipeline::new(reader).enrich(items);
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("no items match {:?}", query);
            } else {
                for item in &items {
                    println!(
                        "{:>6}  {} [{}]",
                        item.entry,
                        item.name,
                        display::quality_name(item.quality)
                    );
                }
            }
        }
        Cmd::Item { entry, json } => {
            let Some(item) = reader.item(entry)? else {
                bail!("item {} not found", entry);
            };
            let mut items = EnrichmentPipeline::new(reader.clone()).enrich(vec![item]);
            let item = items.remove(0);
            if json {
                println!("{}", serde_json::to_string_pretty(&item)?);
            } else {
                print_item(&item, &TemplateResolver::new(reader));
            }
        }
        Cmd::Spell { id, tokens, trace } => {
            let Some(spell) = reader.spell(id)? else {
                bail!("spell {} not found", id);
            };
            let resolver = TemplateResolver::new(reader);
            if tokens {
                let raw = spell.description.as_deref().unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&scan(raw))?);
            } else if trace {
                for (pass, text) in resolver.trace(&spell) {
                    println!("{:<22} {}", pass.name(), text);
                }
            } else {
                if let Some(name) = spell.name.as_deref() {
                    println!("{} ({})", name, spell.entry);
                }
                println!("{}", resolver.resolve(&spell));
            }
        }
        Cmd::Stats => {
            let counts = snapshot.counts()?;
            println!("items: {}", counts.items);
            println!("indexed names: {}", counts.indexed_names);
            println!("spells: {}", counts.spells);
        }
    }
    Ok(())
}
