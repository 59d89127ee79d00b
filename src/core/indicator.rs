use crate::core::catalog::ReagentCatalog;
use crate::domain::model::{
    CurvePoint, IndicatorPhase, IndicatorSpec, Rgb, TitrationCurve, Verdict,
};
use crate::utils::error::{Result, TitrationError};

/// Boundary values belong to the outer colors: `low` is still acidic and
/// `high` is already basic.
pub fn color_for(ph: f64, indicator: &IndicatorSpec) -> (IndicatorPhase, Rgb) {
    if ph <= indicator.low {
        (IndicatorPhase::Acidic, indicator.acid_color)
    } else if ph >= indicator.high {
        (IndicatorPhase::Basic, indicator.base_color)
    } else {
        (IndicatorPhase::Transition, indicator.mid_color)
    }
}

pub fn suitability(ph_at_equivalence: f64, indicator: &IndicatorSpec) -> Verdict {
    if indicator.low <= ph_at_equivalence && ph_at_equivalence <= indicator.high {
        Verdict::Suitable
    } else {
        Verdict::Unsuitable {
            equivalence_ph: ph_at_equivalence,
        }
    }
}

/// Sample nearest to `volume`; the first one wins ties.
pub fn nearest_point(curve: &TitrationCurve, volume: f64) -> Option<&CurvePoint> {
    let mut nearest: Option<(f64, &CurvePoint)> = None;
    for point in &curve.points {
        let distance = (point.volume - volume).abs();
        match nearest {
            Some((best, _)) if distance >= best => {}
            _ => nearest = Some((distance, point)),
        }
    }
    nearest.map(|(_, point)| point)
}

/// pH of the sample nearest to the equivalence volume. The curve is sampled
/// on a 1 mL grid, so this is exact only when eqV falls on the grid.
pub fn ph_at_equivalence(curve: &TitrationCurve, equivalence_volume: f64) -> Result<f64> {
    nearest_point(curve, equivalence_volume)
        .map(|point| point.ph)
        .ok_or(TitrationError::EmptyCurve)
}

pub fn screen_indicators(
    ph_at_equivalence: f64,
    catalog: &ReagentCatalog,
) -> Vec<(IndicatorSpec, Verdict)> {
    catalog
        .indicators()
        .iter()
        .map(|indicator| (indicator.clone(), suitability(ph_at_equivalence, indicator)))
        .collect()
}
