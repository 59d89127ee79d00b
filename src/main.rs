use clap::Parser;
use titration_sim::core::export::ReportExporter;
use titration_sim::core::summary::{render_catalog, render_summary};
use titration_sim::domain::ports::ConfigProvider;
use titration_sim::utils::error::{ErrorSeverity, TitrationError};
use titration_sim::utils::{logger, validation::Validate};
use titration_sim::{CliConfig, LocalStorage, TitrationSimulation};

fn run(config: &CliConfig) -> Result<(), TitrationError> {
    config.validate()?;

    let simulation = TitrationSimulation::default();
    if config.list {
        print!("{}", render_catalog(simulation.catalog()));
        return Ok(());
    }

    let request = simulation.request_from(config)?;
    let report = simulation.run(&request)?;
    print!("{}", render_summary(&report));

    if let Some(output_path) = config.output_path() {
        let exporter = ReportExporter::new(LocalStorage::new(output_path.to_string()));
        let written = exporter.export(&report, config.output_formats())?;
        for name in written {
            tracing::info!("📁 Wrote {}/{}", output_path, name);
            println!("📁 Output saved to: {}/{}", output_path, name);
        }
    }

    Ok(())
}

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting titration-sim CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Titration failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

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
