use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use offmarket::rank::RankedRegion;
use offmarket::region::FirmRecord;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Aligned table for humans
    #[default]
    Table,
    /// Tab-separated values for scripting
    Tsv,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate enterprise value from headcount and revenue
    Value {
        /// Number of employees
        #[arg(long, required_unless_present = "file")]
        employees: Option<u32>,

        /// Estimated annual revenue in dollars
        #[arg(long, required_unless_present = "file", allow_negative_numbers = true)]
        revenue: Option<f64>,

        /// Name shown in TSV/JSON output for a single firm
        #[arg(long, default_value = "firm")]
        name: String,

        /// JSON or YAML file with a list of firms to value instead
        #[arg(long, conflicts_with_all = ["employees", "revenue"])]
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Rank regions by growth/opportunity score
    Growth {
        /// JSON or YAML file with a list of regions
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show only the top N regions
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rank regions by buyer fit against every region in the file
    Buyers {
        /// JSON or YAML file with a list of regions
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show only the top N regions
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the color and height a score maps to
    Scale {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// Validate the config file
    Check,
    /// Write a config file with the built-in defaults
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "offmarket")]
#[command(about = "Price off-market firms and rank regions for buyers", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/offmarket/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("OFFMARKET_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    // Init must work even when the existing config is broken
    if let Commands::Init { force } = cli.command {
        if let Err(e) = offmarket::config::run_init(config_path, force) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match offmarket::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = config.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let scoring = config.scoring_or_default();
    let scale = config.scale_or_default();
    let use_colors = offmarket::output::should_use_colors();

    match cli.command {
        Commands::Check => {
            println!("Config OK");
        }
        Commands::Scale { score } => {
            println!(
                "{}",
                offmarket::output::format_scale_lookup(score, &scale, use_colors)
            );
        }
        Commands::Value {
            employees,
            revenue,
            name,
            file,
            format,
        } => {
            let firms = match (file, employees, revenue) {
                (Some(path), _, _) => match offmarket::region::load_firms(&path) {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("Input error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
                (None, Some(employee_count), Some(estimated_revenue)) => vec![FirmRecord {
                    name,
                    employee_count,
                    estimated_revenue,
                }],
                _ => {
                    // clap enforces --employees/--revenue unless --file is given
                    eprintln!("Either --file or both --employees and --revenue are required.");
                    std::process::exit(EXIT_INPUT);
                }
            };
            let single = firms.len() == 1;
            let valued = offmarket::rank::value_firms(firms, &scoring);

            let output = match format {
                OutputFormat::Table if single => {
                    let (firm, valuation) = &valued[0];
                    offmarket::output::format_valuation_detail(
                        &firm.valuation_input(),
                        valuation,
                        use_colors,
                    )
                }
                OutputFormat::Table => offmarket::output::format_firm_table(&valued, use_colors),
                OutputFormat::Tsv => offmarket::output::format_firm_tsv(&valued),
                OutputFormat::Json => match offmarket::output::format_firm_json(&valued) {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
            };
            println!("{}", output);
        }
        Commands::Growth {
            file,
            format,
            limit,
        } => {
            let regions = load_regions_or_exit(&file);
            let ranked = offmarket::rank::rank_by_growth(regions, &scoring);
            print_ranked(ranked, limit, format, &scale, use_colors, cli.verbose);
        }
        Commands::Buyers {
            file,
            format,
            limit,
        } => {
            let regions = load_regions_or_exit(&file);
            let ranked = offmarket::rank::rank_by_buyer_fit(regions, &scoring);
            print_ranked(ranked, limit, format, &scale, use_colors, cli.verbose);
        }
        // Handled before the config is loaded
        Commands::Init { .. } => {}
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}

fn load_regions_or_exit(path: &std::path::Path) -> Vec<offmarket::region::Region> {
    match offmarket::region::load_regions(path) {
        Ok(regions) => regions,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn print_ranked(
    mut ranked: Vec<RankedRegion>,
    limit: Option<usize>,
    format: OutputFormat,
    scale: &offmarket::scale::ScaleConfig,
    use_colors: bool,
    verbose: bool,
) {
    if let Some(n) = limit {
        ranked.truncate(n);
    }

    match format {
        OutputFormat::Table if verbose && !ranked.is_empty() => {
            // Verbose mode: table row followed by the component breakdown
            for (idx, row) in ranked.iter().enumerate() {
                println!(
                    "{:>2}. {}  {}",
                    idx + 1,
                    offmarket::output::format_score(row.result.score, row.result.incomplete),
                    row.region.label()
                );
                println!("{}", offmarket::output::format_score_breakdown(&row.result));
                println!();
            }
        }
        OutputFormat::Table => {
            println!(
                "{}",
                offmarket::output::format_region_table(&ranked, scale, use_colors)
            );
        }
        OutputFormat::Tsv => {
            let tsv = offmarket::output::format_region_tsv(&ranked, scale);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        OutputFormat::Json => match offmarket::output::format_region_json(&ranked, scale) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
    }
}
