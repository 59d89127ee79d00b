pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::DomainErrorPolicy;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_formats, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "titration-sim")]
#[command(about = "Acid-base titration curve and indicator color simulator")]
pub struct CliConfig {
    #[arg(long, default_value = "hcl", help = "Acid in the flask (catalog key or name)")]
    pub acid: String,

    #[arg(long, default_value = "naoh", help = "Titrant base (catalog key or name)")]
    pub base: String,

    #[arg(long, default_value = "bromothymol-blue")]
    pub indicator: String,

    #[arg(long, default_value = "0.1", help = "Acid concentration in mol/L")]
    pub acid_concentration: f64,

    #[arg(long, default_value = "25.0", help = "Acid volume in mL")]
    pub acid_volume: f64,

    #[arg(long, default_value = "0.1", help = "Base concentration in mol/L")]
    pub base_concentration: f64,

    #[arg(long, help = "Titrant volume to evaluate, in mL (defaults to half-equivalence)")]
    pub titrant_volume: Option<f64>,

    #[arg(long, default_value = "skip", help = "skip or abort on unsolvable curve samples")]
    pub on_domain_error: DomainErrorPolicy,

    #[arg(long, help = "Directory for exported curve and report")]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "List catalog entries and exit")]
    pub list: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn acid(&self) -> &str {
        &self.acid
    }

    fn base(&self) -> &str {
        &self.base
    }

    fn indicator(&self) -> &str {
        &self.indicator
    }

    fn acid_concentration(&self) -> f64 {
        self.acid_concentration
    }

    fn acid_volume(&self) -> f64 {
        self.acid_volume
    }

    fn base_concentration(&self) -> f64 {
        self.base_concentration
    }

    fn titrant_volume(&self) -> Option<f64> {
        self.titrant_volume
    }

    fn domain_error_policy(&self) -> DomainErrorPolicy {
        self.on_domain_error
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
            validate_formats("formats", &self.formats, &crate::core::export::SUPPORTED_FORMATS)?;
        }
        Ok(())
    }
}
