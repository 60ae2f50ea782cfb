use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use econ_compare::api::{REST_COUNTRIES_API, WORLD_BANK_API};
use econ_compare::catalog::CatalogFilter;
use econ_compare::report::timestamp_label;
use econ_compare::window::DEFAULT_WINDOW_YEARS;
use econ_compare::{Client, Session, format, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "econ-compare",
    version,
    about = "Compare World Bank economic indicators across up to five countries"
)]
struct Cli {
    /// World Bank API root.
    #[arg(long, global = true, default_value = WORLD_BANK_API)]
    world_bank_url: String,
    /// REST Countries API root.
    #[arg(long, global = true, default_value = REST_COUNTRIES_API)]
    rest_countries_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the country catalog (optionally filtered).
    Countries(CountriesArgs),
    /// Fetch and compare indicators for the given countries.
    Compare(CompareArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Case-insensitive substring of the country name.
    #[arg(short, long, default_value = "")]
    search: String,
    /// Exact region (e.g., Europe, Asia).
    #[arg(short, long, default_value = "")]
    region: String,
    /// Exact income level code (e.g., HIC, LMC).
    #[arg(short, long, default_value = "")]
    income: String,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// ISO3 country codes separated by comma or semicolon (at most 5, e.g., FRA,DEU)
    #[arg(short, long)]
    countries: String,
    /// Print the windowed time series of this indicator code for every country.
    #[arg(long)]
    series: Option<String>,
    /// Trailing years shown for --series.
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_YEARS)]
    years: u32,
    /// Save all fetched observations to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_ascii_uppercase())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::with_endpoints(cli.world_bank_url, cli.rest_countries_url);
    let session = Session::start(client)
        .context("failed to load country data; check connectivity and retry")?;
    match cli.cmd {
        Command::Countries(args) => cmd_countries(&session, args),
        Command::Compare(args) => cmd_compare(session, args),
    }
}

fn cmd_countries(session: &Session<Client>, args: CountriesArgs) -> Result<()> {
    let filter = CatalogFilter {
        search: args.search,
        region: args.region,
        income_level: args.income,
    };
    for c in session.catalog().filter(&filter) {
        println!(
            "{}  {} {}  [{} / {}]",
            c.code, c.flag, c.name, c.region, c.income_level
        );
    }
    Ok(())
}

fn cmd_compare(mut session: Session<Client>, args: CompareArgs) -> Result<()> {
    for code in parse_list(&args.countries) {
        session
            .select(&code)
            .with_context(|| format!("cannot select {}", code))?;
    }

    let compared = session.compare()?;
    let table = econ_compare::report::ComparisonTable::build(session.registry(), &compared);
    print!("{}", table);

    for c in &compared {
        let failed = c.data.failed_indicators();
        if !failed.is_empty() {
            eprintln!("{}: unavailable: {}", c.country.code, failed.join(", "));
        }
    }

    if let Some(indicator) = args.series.as_deref() {
        let def = session
            .registry()
            .get(indicator)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown indicator: {}", indicator))?;
        println!();
        println!("{} ({})", def.name, def.unit);
        for c in &compared {
            let obs = session
                .window(&c.country.code, &def.code, args.years)
                .unwrap_or_default();
            println!("{}  {}", c.country.name, timestamp_label(&obs));
            for o in obs {
                println!("  {}  {}", o.year, format::format_value(Some(o.value), def.format));
            }
        }
    }

    if let Some(path) = args.out.as_ref() {
        let rows = storage::rows(&compared);
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&rows, path)?,
            "json" => storage::save_json(&rows, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }

    Ok(())
}
