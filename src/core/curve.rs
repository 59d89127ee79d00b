use crate::core::engine::compute_ph;
use crate::domain::model::{CurvePoint, DomainErrorPolicy, SkippedSample, TitrationCurve, TitrationParams};
use crate::utils::error::{Result, TitrationError};
use crate::utils::validation::Validate;

/// Samples at 0, 1, 2, ... mL below twice the acid volume.
pub fn sample_count(acid_volume: f64) -> usize {
    if acid_volume > 0.0 && acid_volume.is_finite() {
        (2.0 * acid_volume).ceil() as usize
    } else {
        0
    }
}

pub fn generate_curve(params: &TitrationParams, policy: DomainErrorPolicy) -> Result<TitrationCurve> {
    // Bounds the sample count before allocating
    params.validate()?;

    let count = sample_count(params.acid_volume);
    let mut curve = TitrationCurve {
        points: Vec::with_capacity(count),
        skipped: Vec::new(),
    };

    // 1 mL sweep; only log-domain failures are subject to the policy
    for step in 0..count {
        let volume = step as f64;
        match compute_ph(params, volume) {
            Ok(reading) => curve.points.push(CurvePoint {
                volume,
                ph: reading.ph,
            }),
            Err(err @ TitrationError::DomainError { .. }) => match policy {
                DomainErrorPolicy::Skip => {
                    tracing::warn!("Skipping curve sample at {} mL: {}", volume, err);
                    curve.skipped.push(SkippedSample {
                        volume,
                        reason: err.to_string(),
                    });
                }
                DomainErrorPolicy::Abort => return Err(err),
            },
            Err(err) => return Err(err),
        }
    }

    tracing::debug!(
        "Generated curve with {} points ({} skipped)",
        curve.points.len(),
        curve.skipped.len()
    );

    Ok(curve)
}
