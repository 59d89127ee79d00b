//! Titrant volume to pH for an acid in the flask titrated with a base.
//!
//! Amounts are tracked in equivalents (moles times the species' n-factor), so
//! a diprotic acid simply carries twice the acid equivalents. Base strength is
//! never consulted: the regime formulas key on the acid's dissociation
//! constant only.

use crate::domain::model::{PhReading, Strength, TitrationParams};
use crate::utils::error::{Result, TitrationError};

/// pKw at 25 °C.
pub const PKW: f64 = 14.0;

fn log10_checked(argument: f64, volume: f64) -> Result<f64> {
    if argument > 0.0 && argument.is_finite() {
        Ok(argument.log10())
    } else {
        Err(TitrationError::DomainError { volume, argument })
    }
}

/// Amounts closer than a few ulps of the larger one are the same amount;
/// rounding in `c * v / 1000` would otherwise leave a ~1e-20 mol remainder.
fn is_equivalent(n_acid: f64, n_base: f64) -> bool {
    (n_base - n_acid).abs() <= f64::EPSILON * 8.0 * n_acid.max(n_base)
}

fn acid_equivalents(params: &TitrationParams) -> f64 {
    params.acid_concentration * params.acid_volume / 1000.0 * f64::from(params.acid.equivalents)
}

fn base_equivalents(params: &TitrationParams, titrant_volume: f64) -> f64 {
    params.base_concentration * titrant_volume / 1000.0 * f64::from(params.base.equivalents)
}

/// Volume of titrant (mL) that delivers as many base equivalents as the flask
/// holds acid equivalents. Depends on the parameters only.
pub fn equivalence_volume(params: &TitrationParams) -> Result<f64> {
    let c_base = params.base_concentration;
    if !(c_base > 0.0 && c_base.is_finite()) {
        return Err(TitrationError::InvalidConcentration {
            field: "base_concentration".to_string(),
            value: c_base,
        });
    }

    let per_litre = c_base * f64::from(params.base.equivalents);
    Ok(acid_equivalents(params) / per_litre * 1000.0)
}

pub fn compute_ph(params: &TitrationParams, titrant_volume: f64) -> Result<PhReading> {
    if !(titrant_volume >= 0.0 && titrant_volume.is_finite()) {
        return Err(TitrationError::InvalidVolume {
            field: "titrant_volume".to_string(),
            value: titrant_volume,
        });
    }

    // Amounts in the flask after this much titrant
    let equivalence_volume = equivalence_volume(params)?;
    let n_acid = acid_equivalents(params);
    let n_base = base_equivalents(params, titrant_volume);
    let total_volume_l = (params.acid_volume + titrant_volume) / 1000.0;

    // Regime follows whichever side is in excess
    let ph = if is_equivalent(n_acid, n_base) {
        match params.acid.strength {
            Strength::Strong => 7.0,
            // Conjugate base hydrolysis at the equivalence point.
            Strength::Weak(ka) => PKW - 0.5 * (PKW + log10_checked(ka, titrant_volume)?),
        }
    } else if n_base < n_acid {
        match params.acid.strength {
            Strength::Strong => {
                let h = (n_acid - n_base) / total_volume_l;
                -log10_checked(h, titrant_volume)?
            }
            Strength::Weak(ka) => {
                // Buffer region: pH = pKa + log([A-]/[HA]); the shared volume cancels.
                let ha = n_acid - n_base;
                let a = n_base;
                -log10_checked(ka, titrant_volume)? + log10_checked(a / ha, titrant_volume)?
            }
        }
    } else {
        let oh = (n_base - n_acid) / total_volume_l;
        PKW + log10_checked(oh, titrant_volume)?
    };

    tracing::trace!(
        titrant_volume,
        n_acid,
        n_base,
        ph,
        "computed pH sample"
    );

    Ok(PhReading {
        ph,
        equivalence_volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ReagentCatalog;

    fn params(acid: &str, base: &str, c_acid: f64, v_acid: f64, c_base: f64) -> TitrationParams {
        let catalog = ReagentCatalog::builtin();
        TitrationParams {
            acid: catalog.lookup_acid(acid).unwrap(),
            base: catalog.lookup_base(base).unwrap(),
            acid_concentration: c_acid,
            acid_volume: v_acid,
            base_concentration: c_base,
        }
    }

    #[test]
    fn test_strong_strong_reference_points() {
        let p = params("hcl", "naoh", 0.1, 25.0, 0.1);

        assert!((equivalence_volume(&p).unwrap() - 25.0).abs() < 1e-9);
        assert!((compute_ph(&p, 0.0).unwrap().ph - 1.0).abs() < 1e-9);
        assert_eq!(compute_ph(&p, 25.0).unwrap().ph, 7.0);

        // 2.5 mmol OH- excess in 75 mL
        let past = compute_ph(&p, 50.0).unwrap().ph;
        assert!((past - 12.523).abs() < 0.01, "pH was {}", past);
    }

    #[test]
    fn test_weak_acid_half_equivalence_is_pka() {
        let p = params("ch3cooh", "naoh", 0.1, 25.0, 0.1);
        let reading = compute_ph(&p, 12.5).unwrap();

        let pka = -(1.8e-5f64).log10();
        assert!((reading.ph - pka).abs() < 0.05, "pH was {}", reading.ph);
        assert!((reading.ph - 4.74).abs() < 0.05);
        assert!((reading.equivalence_volume - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_weak_acid_equivalence_is_basic() {
        let p = params("ch3cooh", "naoh", 0.1, 25.0, 0.1);
        let ph = compute_ph(&p, 25.0).unwrap().ph;
        let expected = 14.0 - 0.5 * (14.0 + (1.8e-5f64).log10());
        assert!((ph - expected).abs() < 1e-12);
        assert!(ph > 7.0);
    }

    #[test]
    fn test_weak_acid_without_titrant_is_domain_error() {
        let p = params("ch3cooh", "naoh", 0.1, 25.0, 0.1);
        assert!(matches!(
            compute_ph(&p, 0.0),
            Err(TitrationError::DomainError { volume, .. }) if volume == 0.0
        ));
    }

    #[test]
    fn test_base_strength_does_not_change_regime() {
        let strong = params("hcl", "naoh", 0.1, 25.0, 0.1);
        let weak = params("hcl", "nh3", 0.1, 25.0, 0.1);
        for volume in [0.0, 10.0, 25.0, 40.0] {
            assert_eq!(
                compute_ph(&strong, volume).unwrap().ph,
                compute_ph(&weak, volume).unwrap().ph
            );
        }
    }

    #[test]
    fn test_equivalents_scale_equivalence_volume() {
        let diprotic = params("h2so4", "naoh", 0.1, 25.0, 0.1);
        assert!((equivalence_volume(&diprotic).unwrap() - 50.0).abs() < 1e-9);

        let dibasic = params("hcl", "caoh2", 0.1, 25.0, 0.1);
        assert!((equivalence_volume(&dibasic).unwrap() - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_equivalence_volume_ignores_titrant() {
        let p = params("hcl", "naoh", 0.2, 40.0, 0.15);
        let expected = equivalence_volume(&p).unwrap();
        for volume in [0.0, 3.0, 53.0, 79.0] {
            assert_eq!(compute_ph(&p, volume).unwrap().equivalence_volume, expected);
        }
        assert!(expected > 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let p = params("hcl", "naoh", 0.1, 25.0, 0.0);
        assert!(matches!(
            compute_ph(&p, 10.0),
            Err(TitrationError::InvalidConcentration { .. })
        ));

        let p = params("hcl", "naoh", 0.1, 25.0, 0.1);
        assert!(matches!(
            compute_ph(&p, -1.0),
            Err(TitrationError::InvalidVolume { .. })
        ));
        assert!(compute_ph(&p, f64::NAN).is_err());
    }

    #[test]
    fn test_rounding_at_equivalence_is_neutral() {
        // eqV computes to 2.9999999999999996 for the first pair
        for (c_acid, v_acid, c_base) in [(0.01, 30.0, 0.1), (0.01, 45.0, 0.15)] {
            let p = params("hcl", "naoh", c_acid, v_acid, c_base);
            assert_eq!(compute_ph(&p, 3.0).unwrap().ph, 7.0);

            let mut previous = f64::NEG_INFINITY;
            for step in 0..(2.0 * v_acid) as usize {
                let ph = compute_ph(&p, step as f64).unwrap().ph;
                assert!((0.0..=14.0).contains(&ph), "pH {} at {} mL", ph, step);
                assert!(ph >= previous, "pH dropped at {} mL", step);
                previous = ph;
            }
        }
    }

    #[test]
    fn test_strong_strong_is_monotonic() {
        let p = params("hcl", "naoh", 0.1, 25.0, 0.1);
        let mut previous = f64::NEG_INFINITY;
        for step in 0..50 {
            let ph = compute_ph(&p, step as f64).unwrap().ph;
            assert!(ph >= previous, "pH dropped at {} mL", step);
            previous = ph;
        }
    }
}
