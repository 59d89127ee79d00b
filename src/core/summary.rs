use crate::core::catalog::ReagentCatalog;
use crate::domain::model::{Strength, TitrationReport, Verdict};
use std::fmt;

/// Text block printed by the CLIs after a run.
pub struct Summary<'a>(pub &'a TitrationReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let params = &report.params;

        writeln!(f, "🧾 Titration Summary")?;
        writeln!(
            f,
            "  Acid: {} ({} M, {} mL)",
            params.acid.name, params.acid_concentration, params.acid_volume
        )?;
        writeln!(f, "  Base: {} ({} M)", params.base.name, params.base_concentration)?;
        writeln!(f, "  Curve samples: {}", report.curve.len())?;
        if !report.curve.skipped.is_empty() {
            let volumes: Vec<String> = report
                .curve
                .skipped
                .iter()
                .map(|s| format!("{}", s.volume))
                .collect();
            writeln!(f, "  Skipped samples (mL): {}", volumes.join(", "))?;
        }
        writeln!(f, "  Equivalence volume: {:.2} mL", report.equivalence_volume)?;
        writeln!(f, "  Equivalence pH: {:.2}", report.equivalence_ph)?;
        writeln!(
            f,
            "  Current pH: {:.2} at {:.2} mL",
            report.current_ph, report.current_volume
        )?;
        writeln!(f, "  Indicator color: {} ({:?})", report.color, report.phase)?;

        match report.verdict {
            Verdict::Suitable => {
                writeln!(f, "  Verdict: ✅ {} is a suitable indicator.", report.indicator.name)?
            }
            Verdict::Unsuitable { equivalence_ph } => writeln!(
                f,
                "  Verdict: ⚠️ The equivalence pH is {:.2}, so {} is not suitable.",
                equivalence_ph, report.indicator.name
            )?,
        }

        if !report.suitable_indicators.is_empty() {
            writeln!(
                f,
                "  Suitable indicators: {}",
                report.suitable_indicators.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Catalog listing for `--list`.
pub struct CatalogListing<'a>(pub &'a ReagentCatalog);

fn strength_label(strength: &Strength, constant: &str) -> String {
    match strength {
        Strength::Strong => "strong".to_string(),
        Strength::Weak(k) => format!("weak, {}={:e}", constant, k),
    }
}

impl fmt::Display for CatalogListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = self.0;

        writeln!(f, "Acids:")?;
        for acid in catalog.acids() {
            writeln!(
                f,
                "  {:<10} {} [{}, n={}]",
                acid.key,
                acid.name,
                strength_label(&acid.strength, "Ka"),
                acid.equivalents
            )?;
        }

        writeln!(f, "Bases:")?;
        for base in catalog.bases() {
            writeln!(
                f,
                "  {:<10} {} [{}, n={}]",
                base.key,
                base.name,
                strength_label(&base.strength, "Kb"),
                base.equivalents
            )?;
        }

        writeln!(f, "Indicators:")?;
        for indicator in catalog.indicators() {
            writeln!(
                f,
                "  {:<18} {} [pH {}-{}, {} / {} / {}]",
                indicator.key,
                indicator.name,
                indicator.low,
                indicator.high,
                indicator.acid_color,
                indicator.mid_color,
                indicator.base_color
            )?;
        }
        Ok(())
    }
}

pub fn render_summary(report: &TitrationReport) -> String {
    Summary(report).to_string()
}

pub fn render_catalog(catalog: &ReagentCatalog) -> String {
    CatalogListing(catalog).to_string()
}
