//! Built-in reagents and the lookup table the engine resolves names against.

use crate::domain::model::{AcidSpec, BaseSpec, IndicatorSpec, Rgb, Species, Strength};
use crate::utils::error::{ReagentKind, Result, TitrationError};
use std::borrow::Cow;

const fn species(key: &'static str, name: &'static str, strength: Strength, equivalents: u32) -> Species {
    Species {
        key: Cow::Borrowed(key),
        name: Cow::Borrowed(name),
        strength,
        equivalents,
    }
}

const fn indicator(
    key: &'static str,
    name: &'static str,
    low: f64,
    high: f64,
    colors: [u32; 3],
) -> IndicatorSpec {
    IndicatorSpec {
        key: Cow::Borrowed(key),
        name: Cow::Borrowed(name),
        low,
        high,
        acid_color: Rgb::from_u32(colors[0]),
        mid_color: Rgb::from_u32(colors[1]),
        base_color: Rgb::from_u32(colors[2]),
    }
}

static BUILTIN_ACIDS: [AcidSpec; 3] = [
    species("hcl", "Strong acid (HCl)", Strength::Strong, 1),
    species("ch3cooh", "Weak acid (CH3COOH)", Strength::Weak(1.8e-5), 1),
    // First proton is fully dissociated; the second is folded into the n-factor.
    species("h2so4", "Diprotic acid (H2SO4)", Strength::Strong, 2),
];

static BUILTIN_BASES: [BaseSpec; 3] = [
    species("naoh", "Strong base (NaOH)", Strength::Strong, 1),
    species("nh3", "Weak base (NH3)", Strength::Weak(1.8e-5), 1),
    species("caoh2", "Dibasic base (Ca(OH)2)", Strength::Strong, 2),
];

static BUILTIN_INDICATORS: [IndicatorSpec; 4] = [
    indicator("methyl-orange", "Methyl orange", 3.1, 4.4, [0xFF4500, 0xFFA500, 0xFFFF00]),
    indicator("methyl-red", "Methyl red", 4.4, 6.2, [0xFF0000, 0xFF8C00, 0xFFFF00]),
    indicator("bromothymol-blue", "Bromothymol blue", 6.0, 7.6, [0xFFFF00, 0x00FF00, 0x0000FF]),
    indicator("phenolphthalein", "Phenolphthalein", 8.2, 10.0, [0xFFFFFF, 0xFFC0CB, 0xFF00FF]),
];

fn matches_name(key: &str, name: &str, query: &str) -> bool {
    let query = query.trim();
    key.eq_ignore_ascii_case(query) || name.eq_ignore_ascii_case(query)
}

fn upsert<T>(entries: &mut Vec<T>, entry: T, key_of: impl Fn(&T) -> &str) {
    let key = key_of(&entry).to_string();
    match entries
        .iter_mut()
        .find(|existing| key_of(existing).eq_ignore_ascii_case(&key))
    {
        Some(slot) => *slot = entry,
        None => entries.push(entry),
    }
}

#[derive(Debug, Clone)]
pub struct ReagentCatalog {
    acids: Vec<AcidSpec>,
    bases: Vec<BaseSpec>,
    indicators: Vec<IndicatorSpec>,
}

impl Default for ReagentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReagentCatalog {
    pub fn builtin() -> Self {
        Self {
            acids: BUILTIN_ACIDS.to_vec(),
            bases: BUILTIN_BASES.to_vec(),
            indicators: BUILTIN_INDICATORS.to_vec(),
        }
    }

    /// Adds an acid, replacing any entry with the same key.
    pub fn with_acid(mut self, acid: AcidSpec) -> Self {
        upsert(&mut self.acids, acid, |s| &*s.key);
        self
    }

    pub fn with_base(mut self, base: BaseSpec) -> Self {
        upsert(&mut self.bases, base, |s| &*s.key);
        self
    }

    pub fn with_indicator(mut self, indicator: IndicatorSpec) -> Self {
        upsert(&mut self.indicators, indicator, |i| &*i.key);
        self
    }

    pub fn acids(&self) -> &[AcidSpec] {
        &self.acids
    }

    pub fn bases(&self) -> &[BaseSpec] {
        &self.bases
    }

    pub fn indicators(&self) -> &[IndicatorSpec] {
        &self.indicators
    }

    /// Resolves by key or display name, ignoring ASCII case.
    pub fn lookup_acid(&self, name: &str) -> Result<AcidSpec> {
        self.acids
            .iter()
            .find(|s| matches_name(&s.key, &s.name, name))
            .cloned()
            .ok_or_else(|| TitrationError::UnknownReagent {
                kind: ReagentKind::Acid,
                name: name.to_string(),
            })
    }

    pub fn lookup_base(&self, name: &str) -> Result<BaseSpec> {
        self.bases
            .iter()
            .find(|s| matches_name(&s.key, &s.name, name))
            .cloned()
            .ok_or_else(|| TitrationError::UnknownReagent {
                kind: ReagentKind::Base,
                name: name.to_string(),
            })
    }

    pub fn lookup_indicator(&self, name: &str) -> Result<IndicatorSpec> {
        self.indicators
            .iter()
            .find(|i| matches_name(&i.key, &i.name, name))
            .cloned()
            .ok_or_else(|| TitrationError::UnknownReagent {
                kind: ReagentKind::Indicator,
                name: name.to_string(),
            })
    }
}
