use clap::Parser;
use titration_sim::core::export::ReportExporter;
use titration_sim::core::summary::render_summary;
use titration_sim::domain::ports::ConfigProvider;
use titration_sim::utils::error::ErrorSeverity;
use titration_sim::utils::{logger, validation::Validate};
use titration_sim::{LocalStorage, TitrationSimulation, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-titration")]
#[command(about = "Run a titration scenario described in a TOML file")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "titration.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the scenario's indicator
    #[arg(long)]
    indicator: Option<String>,

    /// Override the scenario's titrant volume (mL)
    #[arg(long)]
    titrant_volume: Option<f64>,

    /// Show the resolved scenario without computing it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load scenario file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if args.verbose {
        logger::init_cli_logger(true);
    } else {
        logger::init_with_level(config.log_level());
    }

    tracing::info!("🚀 Starting TOML titration runner");
    tracing::info!("📁 Loaded scenario from: {}", args.config);

    if let Some(indicator) = &args.indicator {
        config.titration.indicator = indicator.clone();
        tracing::info!("🔧 Indicator overridden to: {}", indicator);
    }
    if let Some(volume) = args.titrant_volume {
        config.titration.titrant_volume = Some(volume);
        tracing::info!("🔧 Titrant volume overridden to: {} mL", volume);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_scenario_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be computed");
        return Ok(());
    }

    let simulation = TitrationSimulation::new(config.build_catalog()?);
    let outcome = simulation
        .request_from(&config)
        .and_then(|request| simulation.run(&request))
        .and_then(|report| {
            print!("{}", render_summary(&report));
            match config.output_path() {
                Some(path) => {
                    let (csv_name, json_name) = config.filenames();
                    ReportExporter::new(LocalStorage::new(path.to_string()))
                        .with_filenames(csv_name, json_name)
                        .export(&report, config.output_formats())
                        .map(|written| {
                            written
                                .into_iter()
                                .map(|name| format!("{}/{}", path, name))
                                .collect::<Vec<_>>()
                        })
                }
                None => Ok(Vec::new()),
            }
        });

    match outcome {
        Ok(written) => {
            for file in written {
                tracing::info!("📁 Output saved to: {}", file);
                println!("📁 Output saved to: {}", file);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Scenario '{}' failed: {} (Category: {:?}, Severity: {:?})",
                config.scenario.name,
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_scenario_summary(config: &TomlConfig, args: &Args) {
    let t = &config.titration;

    println!("📋 Scenario: {}", config.scenario.name);
    if let Some(description) = &config.scenario.description {
        println!("  {}", description);
    }
    println!(
        "  Acid: {} ({} M, {} mL)",
        t.acid, t.acid_concentration, t.acid_volume
    );
    println!("  Base: {} ({} M)", t.base, t.base_concentration);
    println!("  Indicator: {}", t.indicator);
    match t.titrant_volume {
        Some(volume) => println!("  Titrant volume: {} mL", volume),
        None => println!("  Titrant volume: half-equivalence"),
    }
    println!("  On domain error: {}", config.domain_error_policy());

    if let Some(path) = config.output_path() {
        println!("  Output: {} [{}]", path, config.output_formats().join(", "));
    }

    if let Some(extensions) = &config.catalog {
        println!(
            "  Custom catalog entries: {} acids, {} bases, {} indicators",
            extensions.acids.len(),
            extensions.bases.len(),
            extensions.indicators.len()
        );
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
