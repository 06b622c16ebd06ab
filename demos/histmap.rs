use clap::{Parser, Subcommand};
use histmap::{
    HistMap, HistMapBuilder, HistMapHashConfig, HistMapHashState, DEFAULT_EXPECTED_KEYS,
    DEFAULT_SCALING_FACTOR,
};
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, Error, Result};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Load(args) => run_load(args),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "histmap utility for loading word lists into a fixed-capacity table",
    subcommand_required = true,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert every word of a word list, apply removals, and print a summary
    Load(LoadArgs),
}

#[derive(clap::Args)]
struct LoadArgs {
    /// Path to a word list with one word per line
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Number of distinct keys to size the table for
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_EXPECTED_KEYS)]
    expected: usize,

    /// Slots allocated per expected key
    #[arg(long, value_name = "FACTOR", default_value_t = DEFAULT_SCALING_FACTOR)]
    scaling_factor: usize,

    /// Seed for the foldhash hash function
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    hash_seed: u64,

    /// Hash configuration as JSON, e.g. '{"kind": "constant", "value": 1}'; overrides --hash-seed
    #[arg(long, value_name = "JSON")]
    hash: Option<String>,

    /// Words to remove after loading
    #[arg(short, long, value_name = "WORD")]
    remove: Vec<String>,

    /// Optional key to look up after loading
    #[arg(short, long)]
    key: Option<String>,
}

fn run_load(args: LoadArgs) -> Result<()> {
    let mut builder = HistMapBuilder::default()
        .with_expected_keys(args.expected)
        .with_scaling_factor(args.scaling_factor)
        .with_hash_seed(args.hash_seed);
    if let Some(json) = &args.hash {
        builder = builder.with_hash_config(HistMapHashConfig::from_json(json)?);
    }
    info!("hashing with {:?}", builder.hash_config());
    let mut map = builder.build::<i64>()?;

    let loaded = load_words(&args.input, &mut map)?;
    info!("loaded {loaded} words from {}", args.input.display());

    for word in &args.remove {
        if map.remove(word).is_none() {
            warn!("{word:?} is not in the table");
        }
    }

    let json = serde_json::to_string_pretty(&map.info())
        .map_err(|e| Error::other(format!("Failed to format JSON: {e}")))?;
    println!("{}", json);

    match (map.get_first(), map.get_last()) {
        (Ok((first, first_value)), Ok((last, last_value))) => {
            println!("first: {first} = {first_value}");
            println!("last: {last} = {last_value}");
        }
        _ => println!("table is empty"),
    }

    if let Some(key) = args.key {
        println!("{}: {:?}", key, map.get(&key));
    }

    Ok(())
}

/// Inserts each non-blank line of `path`, keyed by the word with its line
/// index as value. Returns the number of words inserted.
fn load_words(path: &Path, map: &mut HistMap<i64, HistMapHashState>) -> Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut loaded = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        map.insert(word, index as i64)?;
        loaded += 1;
    }
    Ok(loaded)
}
