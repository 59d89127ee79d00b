use crate::core::catalog::ReagentCatalog;
use crate::core::curve::generate_curve;
use crate::core::engine::{compute_ph, equivalence_volume};
use crate::core::indicator::{
    color_for, nearest_point, ph_at_equivalence, screen_indicators, suitability,
};
use crate::domain::model::{
    DomainErrorPolicy, IndicatorSpec, TitrationCurve, TitrationParams, TitrationReport,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, TitrationError};
use crate::utils::validation::{
    validate_concentration, validate_non_negative, validate_range, Validate, MAX_ACID_VOLUME,
    MIN_ACID_VOLUME,
};

impl Validate for TitrationParams {
    fn validate(&self) -> Result<()> {
        validate_concentration("acid_concentration", self.acid_concentration)?;
        validate_range("acid_volume", self.acid_volume, MIN_ACID_VOLUME, MAX_ACID_VOLUME)?;
        validate_concentration("base_concentration", self.base_concentration)?;
        Ok(())
    }
}

/// One resolved simulation request: reagents looked up, numbers attached.
#[derive(Debug, Clone)]
pub struct TitrationRequest {
    pub params: TitrationParams,
    pub indicator: IndicatorSpec,
    pub titrant_volume: Option<f64>,
    pub policy: DomainErrorPolicy,
}

impl TitrationRequest {
    pub fn from_config<C: ConfigProvider>(config: &C, catalog: &ReagentCatalog) -> Result<Self> {
        let params = TitrationParams {
            acid: catalog.lookup_acid(config.acid())?,
            base: catalog.lookup_base(config.base())?,
            acid_concentration: config.acid_concentration(),
            acid_volume: config.acid_volume(),
            base_concentration: config.base_concentration(),
        };
        let indicator = catalog.lookup_indicator(config.indicator())?;

        Ok(Self {
            params,
            indicator,
            titrant_volume: config.titrant_volume(),
            policy: config.domain_error_policy(),
        })
    }
}

impl Validate for TitrationRequest {
    fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if let Some(volume) = self.titrant_volume {
            validate_non_negative("titrant_volume", volume)?;
        }
        Ok(())
    }
}

pub struct TitrationSimulation {
    catalog: ReagentCatalog,
}

impl Default for TitrationSimulation {
    fn default() -> Self {
        Self::new(ReagentCatalog::builtin())
    }
}

impl TitrationSimulation {
    pub fn new(catalog: ReagentCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ReagentCatalog {
        &self.catalog
    }

    pub fn request_from<C: ConfigProvider>(&self, config: &C) -> Result<TitrationRequest> {
        let request = TitrationRequest::from_config(config, &self.catalog)?;
        request.validate()?;
        Ok(request)
    }

    pub fn run(&self, request: &TitrationRequest) -> Result<TitrationReport> {
        request.validate()?;

        let params = &request.params;
        tracing::debug!(
            "Simulating {} ({} M, {} mL) against {} ({} M)",
            params.acid.name,
            params.acid_concentration,
            params.acid_volume,
            params.base.name,
            params.base_concentration
        );

        // Curve and equivalence point
        let curve = generate_curve(params, request.policy)?;
        let eq_volume = equivalence_volume(params)?;
        let eq_ph = ph_at_equivalence(&curve, eq_volume)?;
        tracing::debug!("Equivalence at {:.2} mL, pH {:.2}", eq_volume, eq_ph);

        // Current reading: defaults to half-equivalence, limited to the sampled range
        let max_volume = curve.last_volume().unwrap_or(0.0);
        let requested_volume = request
            .titrant_volume
            .unwrap_or(eq_volume / 2.0)
            .clamp(0.0, max_volume);
        let (current_volume, current_ph) =
            self.current_reading(params, &curve, requested_volume, request.policy)?;

        // Indicator color and screening
        let (phase, color) = color_for(current_ph, &request.indicator);
        let verdict = suitability(eq_ph, &request.indicator);
        let suitable_indicators = screen_indicators(eq_ph, &self.catalog)
            .into_iter()
            .filter(|(_, verdict)| verdict.is_suitable())
            .map(|(indicator, _)| indicator.name.into_owned())
            .collect();

        tracing::info!(
            "{} at {:.2} mL: pH {:.2}, color {}",
            request.indicator.name,
            current_volume,
            current_ph,
            color
        );

        Ok(TitrationReport {
            generated_at: chrono::Utc::now(),
            params: params.clone(),
            indicator: request.indicator.clone(),
            curve,
            equivalence_volume: eq_volume,
            equivalence_ph: eq_ph,
            current_volume,
            current_ph,
            phase,
            color,
            verdict,
            suitable_indicators,
        })
    }

    /// pH at `volume`. Under `Skip`, a volume the engine cannot evaluate moves to
    /// the nearest surviving curve sample, the same one the sweep kept.
    fn current_reading(
        &self,
        params: &TitrationParams,
        curve: &TitrationCurve,
        volume: f64,
        policy: DomainErrorPolicy,
    ) -> Result<(f64, f64)> {
        match compute_ph(params, volume) {
            Ok(reading) => Ok((volume, reading.ph)),
            Err(err @ TitrationError::DomainError { .. }) if policy == DomainErrorPolicy::Skip => {
                let point = nearest_point(curve, volume).ok_or(TitrationError::EmptyCurve)?;
                tracing::warn!(
                    "Reading at {} mL moved to {} mL: {}",
                    volume,
                    point.volume,
                    err
                );
                Ok((point.volume, point.ph))
            }
            Err(err) => Err(err),
        }
    }
}
