use crate::core::catalog::ReagentCatalog;
use crate::core::export::SUPPORTED_FORMATS;
use crate::core::ConfigProvider;
use crate::domain::model::{DomainErrorPolicy, IndicatorSpec, Rgb, Species, Strength};
use crate::utils::error::{Result, TitrationError};
use crate::utils::validation::{
    validate_concentration, validate_formats, validate_non_empty_string, validate_non_negative,
    validate_path, validate_range, Validate, MAX_ACID_VOLUME, MIN_ACID_VOLUME,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub scenario: ScenarioInfo,
    pub titration: TitrationSection,
    pub sampling: Option<SamplingConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
    pub catalog: Option<CatalogExtensions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitrationSection {
    pub acid: String,
    pub base: String,
    pub indicator: String,
    pub acid_concentration: f64,
    pub acid_volume: f64,
    pub base_concentration: f64,
    pub titrant_volume: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub on_domain_error: Option<DomainErrorPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogExtensions {
    #[serde(default)]
    pub acids: Vec<SpeciesEntry>,
    #[serde(default)]
    pub bases: Vec<SpeciesEntry>,
    #[serde(default)]
    pub indicators: Vec<IndicatorEntry>,
}

/// A user-defined acid or base. Leave `ka`/`kb` out for a strong species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub key: String,
    pub name: String,
    #[serde(alias = "ka", alias = "kb")]
    pub dissociation_constant: Option<f64>,
    pub equivalents: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorEntry {
    pub key: String,
    pub name: String,
    pub range: [f64; 2],
    pub acid: String,
    pub mid: String,
    pub base: String,
}

impl SpeciesEntry {
    fn to_species(&self, field: &str) -> Result<Species> {
        validate_non_empty_string(&format!("{}.key", field), &self.key)?;
        validate_non_empty_string(&format!("{}.name", field), &self.name)?;
        if self.equivalents == 0 {
            return Err(TitrationError::InvalidConfigValueError {
                field: format!("{}.equivalents", field),
                value: self.equivalents.to_string(),
                reason: "A species must provide at least one equivalent".to_string(),
            });
        }

        let strength = match self.dissociation_constant {
            None => Strength::Strong,
            Some(k) if k > 0.0 && k.is_finite() => Strength::Weak(k),
            Some(k) => {
                return Err(TitrationError::InvalidConfigValueError {
                    field: format!("{}.dissociation_constant", field),
                    value: k.to_string(),
                    reason: "Dissociation constant must be positive".to_string(),
                })
            }
        };

        Ok(Species {
            key: self.key.clone().into(),
            name: self.name.clone().into(),
            strength,
            equivalents: self.equivalents,
        })
    }
}

impl IndicatorEntry {
    fn to_indicator(&self, field: &str) -> Result<IndicatorSpec> {
        validate_non_empty_string(&format!("{}.key", field), &self.key)?;
        validate_non_empty_string(&format!("{}.name", field), &self.name)?;

        let [low, high] = self.range;
        if !(low < high) {
            return Err(TitrationError::InvalidConfigValueError {
                field: format!("{}.range", field),
                value: format!("[{}, {}]", low, high),
                reason: "Transition range must satisfy low < high".to_string(),
            });
        }

        let color = |name: &str, value: &str| -> Result<Rgb> {
            value
                .parse::<Rgb>()
                .map_err(|reason| TitrationError::InvalidConfigValueError {
                    field: format!("{}.{}", field, name),
                    value: value.to_string(),
                    reason,
                })
        };

        Ok(IndicatorSpec {
            key: self.key.clone().into(),
            name: self.name.clone().into(),
            low,
            high,
            acid_color: color("acid", &self.acid)?,
            mid_color: color("mid", &self.mid)?,
            base_color: color("base", &self.base)?,
        })
    }
}

impl TomlConfig {
    /// Loads a scenario from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TitrationError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TitrationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TitrationError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("scenario.name", &self.scenario.name)?;

        let t = &self.titration;
        validate_non_empty_string("titration.acid", &t.acid)?;
        validate_non_empty_string("titration.base", &t.base)?;
        validate_non_empty_string("titration.indicator", &t.indicator)?;
        validate_concentration("titration.acid_concentration", t.acid_concentration)?;
        validate_range("titration.acid_volume", t.acid_volume, MIN_ACID_VOLUME, MAX_ACID_VOLUME)?;
        validate_concentration("titration.base_concentration", t.base_concentration)?;
        if let Some(volume) = t.titrant_volume {
            validate_non_negative("titration.titrant_volume", volume)?;
        }

        if let Some(output) = &self.output {
            validate_path("output.output_path", &output.output_path)?;
            validate_formats("output.formats", &output.formats, &SUPPORTED_FORMATS)?;
        }

        // Surfaces bad catalog entries before any computation
        self.build_catalog()?;

        Ok(())
    }

    /// Built-in catalog plus the scenario's `[catalog]` entries.
    pub fn build_catalog(&self) -> Result<ReagentCatalog> {
        let mut catalog = ReagentCatalog::builtin();
        let Some(extensions) = &self.catalog else {
            return Ok(catalog);
        };

        for (i, entry) in extensions.acids.iter().enumerate() {
            catalog = catalog.with_acid(entry.to_species(&format!("catalog.acids[{}]", i))?);
        }
        for (i, entry) in extensions.bases.iter().enumerate() {
            catalog = catalog.with_base(entry.to_species(&format!("catalog.bases[{}]", i))?);
        }
        for (i, entry) in extensions.indicators.iter().enumerate() {
            catalog = catalog
                .with_indicator(entry.to_indicator(&format!("catalog.indicators[{}]", i))?);
        }

        Ok(catalog)
    }

    pub fn log_level(&self) -> &str {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .unwrap_or("info")
    }

    pub fn filenames(&self) -> (Option<&str>, Option<&str>) {
        match self.output.as_ref().and_then(|o| o.filenames.as_ref()) {
            Some(names) => (names.csv.as_deref(), names.json.as_deref()),
            None => (None, None),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn acid(&self) -> &str {
        &self.titration.acid
    }

    fn base(&self) -> &str {
        &self.titration.base
    }

    fn indicator(&self) -> &str {
        &self.titration.indicator
    }

    fn acid_concentration(&self) -> f64 {
        self.titration.acid_concentration
    }

    fn acid_volume(&self) -> f64 {
        self.titration.acid_volume
    }

    fn base_concentration(&self) -> f64 {
        self.titration.base_concentration
    }

    fn titrant_volume(&self) -> Option<f64> {
        self.titration.titrant_volume
    }

    fn domain_error_policy(&self) -> DomainErrorPolicy {
        self.sampling
            .as_ref()
            .and_then(|s| s.on_domain_error)
            .unwrap_or_default()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.output_path.as_str())
    }

    fn output_formats(&self) -> &[String] {
        self.output.as_ref().map(|o| o.formats.as_slice()).unwrap_or(&[])
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
