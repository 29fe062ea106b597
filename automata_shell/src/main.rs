use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use automata::patterns::{PATTERNS, find_pattern};
use automata::{Automaton, AutomatonConfig, RuleEdit, RuleTarget};
use automata_coro::CoroStepper;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "automata",
    version,
    about = "Run a two-state cellular automaton with a configurable rule table"
)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid height in cells.
    #[arg(long)]
    rows: Option<usize>,

    /// Grid width in cells.
    #[arg(long)]
    cols: Option<usize>,

    /// RNG seed for the initial grid and random rules.
    #[arg(long)]
    seed: Option<u64>,

    /// Load the rule table from a flat ecrule*/fcrule* record (defaults to
    /// the configured rules path).
    #[arg(long, num_args = 0..=1)]
    rules: Option<Option<PathBuf>>,

    /// Start from a random rule table instead of the default.
    #[arg(long, conflicts_with = "rules")]
    random_rules: bool,

    /// Edit one rule entry, as target:index:state (e.g. f:4:1 or dead:6:1).
    #[arg(long = "edit", value_parser = parse_edit)]
    edits: Vec<RuleEdit>,

    /// Seed the grid with a named pattern instead of random cells.
    #[arg(long)]
    pattern: Option<String>,

    /// Number of generations to run.
    #[arg(long, short = 'n', default_value_t = 1)]
    generations: u64,

    /// Step with one tokio task per row.
    #[arg(long)]
    coro: bool,

    /// Print the neighbor counts under each grid.
    #[arg(long)]
    show_counts: bool,

    /// Keep running after the grid repeats a recent generation.
    #[arg(long)]
    ignore_cycles: bool,

    /// Write the final rule table here (defaults to the configured save path).
    #[arg(long, num_args = 0..=1)]
    save_rules: Option<Option<PathBuf>>,

    /// Run the built-in self test and exit.
    #[arg(long)]
    self_test: bool,

    /// List the named patterns and exit.
    #[arg(long)]
    list_patterns: bool,
}

fn parse_edit(s: &str) -> Result<RuleEdit, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [target, index, state] = parts.as_slice() else {
        return Err(format!("expected target:index:state, got {s:?}"));
    };
    let target: RuleTarget = target.parse().map_err(|e| format!("{e}"))?;
    let index: usize = index
        .parse()
        .map_err(|_| format!("rule index {index:?} is not a number"))?;
    let state: u8 = state
        .parse()
        .map_err(|_| format!("rule state {state:?} is not a number"))?;
    Ok(RuleEdit::new(target, index, state))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.list_patterns {
        for pattern in PATTERNS {
            let (h, w) = pattern.extent();
            println!("{:<20} {h}x{w}", pattern.name);
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    let mut automaton = Automaton::new(config).context("invalid automaton configuration")?;

    if cli.self_test {
        let report = automaton.run_self_test();
        print!("{report}");
        if !report.passed() {
            bail!("self test failed");
        }
        return Ok(());
    }

    configure_rules(&cli, &mut automaton)?;
    if let Some(name) = &cli.pattern {
        let pattern = find_pattern(name).with_context(|| format!("unknown pattern {name:?}"))?;
        automaton.apply_pattern(pattern);
    }

    run(&cli, &mut automaton)?;

    match &cli.save_rules {
        Some(Some(path)) => automaton
            .save_rules_to_file(path)
            .with_context(|| format!("failed to save rules to {}", path.display()))?,
        Some(None) => {
            let path = automaton.config().save_path.display().to_string();
            automaton
                .save_rules()
                .with_context(|| format!("failed to save rules to {path}"))?;
        }
        None => {}
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<AutomatonConfig> {
    let mut config = match &cli.config {
        Some(path) => AutomatonConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AutomatonConfig::default(),
    };
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if cli.seed.is_some() {
        config.rng_seed = cli.seed;
    }
    Ok(config)
}

fn configure_rules(cli: &Cli, automaton: &mut Automaton) -> Result<()> {
    match &cli.rules {
        Some(Some(path)) => automaton
            .load_rules_from_file(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        Some(None) => {
            let path = automaton.config().rules_path.display().to_string();
            automaton
                .load_rules()
                .with_context(|| format!("failed to load rules from {path}"))?;
        }
        None if cli.random_rules => automaton.randomize_rules(),
        None => {}
    }
    for edit in &cli.edits {
        automaton.edit_rule_entry(edit).context("rule edit rejected")?;
    }
    print!("{}", automaton.describe_rules());
    Ok(())
}

fn run(cli: &Cli, automaton: &mut Automaton) -> Result<()> {
    let stepper = if cli.coro {
        Some(CoroStepper::new().context("failed to start row coroutines")?)
    } else {
        None
    };

    for _ in 0..cli.generations {
        print!("{}", automaton.grid());
        if cli.show_counts {
            print!("{}", automaton.neighbor_counts());
        }

        let report = match &stepper {
            Some(stepper) => {
                let next = stepper.next_generation(automaton.grid(), automaton.rules())?;
                automaton.commit_generation(next)
            }
            None => automaton.step(),
        };
        info!(
            generation = report.generation,
            population = report.stats.population,
            births = report.stats.births,
            deaths = report.stats.deaths,
            "Generation complete"
        );
        println!("{}", "-".repeat(automaton.grid().cols()));

        if report.repeated && !cli.ignore_cycles {
            warn!(generation = report.generation, "Grid is cycling, stopping");
            break;
        }
    }
    print!("{}", automaton.grid());
    Ok(())
}
