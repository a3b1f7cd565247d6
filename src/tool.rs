// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! CLI driver that replays an operations file against a chosen engine

use biased_search::{
    default_hash, AdaptiveHashTable, AnyMap, BiasedHashTable, BiasedSkipList, BiasedTreap, Map,
    SplayTree,
};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};
}

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

fn init_tracing(quiet: bool, verbose: u8) -> LevelFilter {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (the library logs through log::*)
    tracing_log::LogTracer::init().expect("Failed to set log tracer");

    let registry = Registry::default();

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("BIASED_LOG")
        .from_env_lossy();

    let subscriber = registry.with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    level_filter
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Engine {
    /// Weight-biased treap
    Treap,
    /// Weight-biased skip list
    Skiplist,
    /// Weight-biased hash table
    Hashtable,
    /// Splay tree
    Splaytree,
    /// BTreeMap reference semantics
    Map,
    /// Discard all operations (control)
    Nop,
}

const DEFAULT_SKIPLIST_LEVELS: usize = 20;

/// Replays an operations file against a biased map engine.
///
/// One command per line: `i <key> <weight>` inserts, `s <key>` searches
/// and prints the result, `d <key>` erases.
#[derive(Parser, Debug)]
#[command(name = "biased")]
#[command(about = "Replays an operations file against a biased map engine")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Enable the self-adjusting mode of the chosen engine
    /// (adaptive treap, move-to-front hash table)
    #[arg(long)]
    self_adjust: bool,

    /// Initial hash-table capacity
    #[arg(long, default_value_t = 1024, value_name = "N")]
    size: usize,

    /// Engine to run the operations against
    #[arg(value_enum)]
    engine: Engine,

    /// Path to the operations file
    operations: PathBuf,
}

fn open_engine(args: &ToolArgs) -> biased_search::Result<AnyMap<String, u64>> {
    Ok(match args.engine {
        Engine::Treap => AnyMap::Treap(BiasedTreap::new(args.self_adjust)),
        Engine::Skiplist => AnyMap::SkipList(BiasedSkipList::new(DEFAULT_SKIPLIST_LEVELS)?),
        Engine::Hashtable => {
            if args.self_adjust {
                AnyMap::ChainedTable(AdaptiveHashTable::new(args.size, default_hash::<String>)?)
            } else {
                AnyMap::OpenTable(BiasedHashTable::new(args.size, default_hash::<String>)?)
            }
        }
        Engine::Splaytree => AnyMap::Splay(SplayTree::new()),
        Engine::Map => AnyMap::Ordered(std::collections::BTreeMap::new()),
        Engine::Nop => AnyMap::Nop,
    })
}

fn run(map: &mut AnyMap<String, u64>, reader: impl BufRead) -> std::io::Result<()> {
    // The operations grammar carries no values, so inserts store their
    // 1-based position in the file
    let mut inserted: u64 = 0;

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        let Some(cmd) = parts.next() else {
            continue;
        };
        let Some(key) = parts.next() else {
            warn!("skipping command without a key: {line}");
            continue;
        };

        match cmd {
            "i" => {
                let weight = parts.next().and_then(|w| w.parse().ok()).unwrap_or(1);
                inserted += 1;
                map.insert(key.to_owned(), inserted, weight);
            }
            "s" => match map.get(&key.to_owned()) {
                Some(value) => println!("{key}: {value}"),
                None => println!("{key}: not found"),
            },
            "d" => {
                map.remove(&key.to_owned());
            }
            _ => warn!("skipping unknown command: {line}"),
        }
    }

    Ok(())
}

fn main() {
    let args = ToolArgs::try_parse().unwrap_or_else(|e| {
        // Usage errors exit 1; clap would default to 2
        let _ = e.print();
        std::process::exit(1);
    });

    let level_filter = init_tracing(args.quiet, args.verbose);

    info!(
        "starting biased ({} {}), log level: {level_filter}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut map = match open_engine(&args) {
        Ok(map) => map,
        Err(e) => die!("Error creating engine: {}", e),
    };

    let file = match File::open(&args.operations) {
        Ok(file) => file,
        Err(e) => die!("Error opening operations file: {}", e),
    };

    if let Err(e) = run(&mut map, BufReader::new(file)) {
        die!("Error reading operations file: {}", e);
    }
}
