use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use cnj_triage::{
    analyze_compatibility, merge_batches, probe, process_batch, read_csv, write_csv,
    BatchSummary, ClassifierConfig, JoinKind, NumberFormat, DEFAULT_DROP_COLUMNS,
};

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Options that never take a value
const SWITCHES: [&str; 1] = ["drop-default"];

const USAGE: &str = "\
Usage:
  cnj-triage classify <input.csv> <output.csv> [--config FILE] [--format canonical|merged|digits] [--drop-default]
  cnj-triage probe <number> [--config FILE] [--format canonical|merged|digits]
  cnj-triage distribution [--config FILE]
  cnj-triage validate [--config FILE]
  cnj-triage init-config <FILE>
  cnj-triage merge <left.csv> <right.csv> <output.csv> --left-on COL --right-on COL [--join inner|left|outer]";

/// Positional arguments plus `--flag value` / `--switch` options
struct Args {
    positional: Vec<String>,
    options: Vec<(String, Option<String>)>,
}

impl Args {
    fn parse(raw: &[String]) -> Self {
        let mut positional = Vec::new();
        let mut options = Vec::new();
        let mut iter = raw.iter().peekable();

        while let Some(arg) = iter.next() {
            if let Some(flag) = arg.strip_prefix("--") {
                let value = if SWITCHES.contains(&flag) {
                    None
                } else {
                    iter.next_if(|next| !next.starts_with("--")).cloned()
                };
                options.push((flag.to_string(), value));
            } else {
                positional.push(arg.clone());
            }
        }

        Args { positional, options }
    }

    fn value(&self, flag: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(name, _)| name == flag)
            .and_then(|(_, value)| value.as_deref())
    }

    fn has(&self, flag: &str) -> bool {
        self.options.iter().any(|(name, _)| name == flag)
    }

    fn positional(&self, idx: usize, what: &str) -> Result<&str> {
        self.positional
            .get(idx)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("missing {}\n\n{}", what, USAGE))
    }

    /// An explicit `--config` must load; only the implicit default may fall back
    fn config(&self) -> Result<ClassifierConfig> {
        match self.value("config") {
            Some(path) => ClassifierConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path)),
            None => Ok(ClassifierConfig::load_or_default(DEFAULT_CONFIG_PATH)),
        }
    }

    fn format(&self) -> Result<NumberFormat> {
        match self.value("format") {
            Some(key) => Ok(key.parse()?),
            None => Ok(NumberFormat::default()),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = raw.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };
    let args = Args::parse(rest);

    match command.as_str() {
        "classify" => run_classify(&args),
        "probe" => run_probe(&args),
        "distribution" => run_distribution(&args),
        "validate" => run_validate(&args),
        "init-config" => run_init_config(&args),
        "merge" => run_merge(&args),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => bail!("unknown command: {}\n\n{}", other, USAGE),
    }
}

fn run_classify(args: &Args) -> Result<()> {
    let input = Path::new(args.positional(0, "input file")?);
    let output = Path::new(args.positional(1, "output file")?);
    let config = args.config()?;
    let format = args.format()?;

    println!("📂 Loading {}...", input.display());
    let mut batch = read_csv(input)?;
    println!("✓ {} rows, {} columns", batch.len(), batch.columns.len());

    if args.has("drop-default") {
        let dropped = batch.drop_columns(&DEFAULT_DROP_COLUMNS, &config.process_number_column);
        println!("✓ Dropped {} bookkeeping columns", dropped);
    }

    let results = process_batch(&mut batch, &config, format)?;
    let summary = BatchSummary::from_classifications(&results);

    write_csv(output, &batch, b';')?;
    println!("💾 Wrote {}", output.display());

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", summary.summary());
    println!("\n👥 By owner:");
    for (owner, count) in &summary.by_owner {
        println!("   {:<40} {}", owner, count);
    }
    println!("\n📅 By year:");
    for (year, count) in &summary.by_year {
        println!("   {}  {}", year, count);
    }

    let problems = summary.problems();
    if !problems.is_empty() {
        println!("\n⚠️  Problems:");
        for problem in problems {
            println!("   ❗ {}", problem);
        }
        for example in &summary.unidentified_digit_examples {
            println!("   e.g. '{}'", example);
        }
    }

    Ok(())
}

fn run_probe(args: &Args) -> Result<()> {
    let number = args.positional(0, "process number")?;
    let config = args.config()?;
    let result = probe(number, &config.routing_table, config.meta_cutoff_year, args.format()?);

    println!("📄 {}", number);
    println!("   Digit:  {}", result.check_digit.legacy_value());
    println!(
        "   Year:   {}",
        result.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("   Owner:  {}", result.owner);
    println!("   Meta 2: {}", result.meta2);
    println!("   Format: {}", result.formatted);
    Ok(())
}

fn run_distribution(args: &Args) -> Result<()> {
    let config = args.config()?;
    println!("🗺️  Digit distribution");
    for group in config.routing_table.distribution() {
        println!("   {:<40} {:>3} digits  {}", group.label, group.digit_count(), group.intervals_text());
    }
    Ok(())
}

fn run_validate(args: &Args) -> Result<()> {
    let config = args.config()?;
    let issues = config.routing_table.validate();
    if issues.is_empty() {
        println!("✅ Ranges are disjoint and cover 1-99");
        return Ok(());
    }

    for issue in &issues {
        println!("   {:?}: {}", issue.severity(), issue);
    }
    println!("⚠️  {} issue(s) found", issues.len());
    Ok(())
}

fn run_init_config(args: &Args) -> Result<()> {
    let path = Path::new(args.positional(0, "config file")?);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    ClassifierConfig::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✓ Default configuration written to {}", path.display());
    Ok(())
}

fn run_merge(args: &Args) -> Result<()> {
    let left = read_csv(Path::new(args.positional(0, "left file")?))?;
    let right = read_csv(Path::new(args.positional(1, "right file")?))?;
    let output = Path::new(args.positional(2, "output file")?);
    let left_on = args.value("left-on").ok_or_else(|| anyhow!("--left-on is required"))?;
    let right_on = args.value("right-on").ok_or_else(|| anyhow!("--right-on is required"))?;

    let compatibility = analyze_compatibility(&left, left_on, &right, right_on)?;
    let (suggested, reason) = compatibility.suggested_join();
    println!(
        "🔗 {} common keys ({:.1}% compatible), suggested {:?}: {}",
        compatibility.common, compatibility.score, suggested, reason
    );

    let kind = match args.value("join") {
        Some(kind) => kind.parse::<JoinKind>().map_err(|e| anyhow!(e))?,
        None => suggested,
    };
    let merged = merge_batches(&left, &right, left_on, right_on, kind)?;
    write_csv(output, &merged, b';')?;
    println!("💾 Wrote {} rows to {}", merged.len(), output.display());
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
