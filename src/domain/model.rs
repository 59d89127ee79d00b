use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Whether a species dissociates completely, or only partially with the given
/// constant (Ka for acids, Kb for bases).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "class", content = "constant")]
pub enum Strength {
    Strong,
    Weak(f64),
}

impl Strength {
    pub fn constant(&self) -> Option<f64> {
        match self {
            Strength::Strong => None,
            Strength::Weak(k) => Some(*k),
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Strength::Strong)
    }
}

/// An acid or a base. `equivalents` is the number of H+ (or OH-) released per
/// formula unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub key: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub strength: Strength,
    pub equivalents: u32,
}

pub type AcidSpec = Species;
pub type BaseSpec = Species;

/// sRGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{}' must start with '#'", s))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("color '{}' must have six hex digits", s));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|e| e.to_string())?;
        Ok(Rgb::from_u32(value))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub key: Cow<'static, str>,
    pub name: Cow<'static, str>,
    /// Transition interval, `low < high`.
    pub low: f64,
    pub high: f64,
    pub acid_color: Rgb,
    pub mid_color: Rgb,
    pub base_color: Rgb,
}

/// Inputs of one titration. Titrant volume is passed per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitrationParams {
    pub acid: AcidSpec,
    pub base: BaseSpec,
    /// mol/L
    pub acid_concentration: f64,
    /// mL
    pub acid_volume: f64,
    /// mol/L
    pub base_concentration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhReading {
    pub ph: f64,
    pub equivalence_volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    #[serde(rename = "volume_ml")]
    pub volume: f64,
    pub ph: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSample {
    pub volume: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitrationCurve {
    pub points: Vec<CurvePoint>,
    pub skipped: Vec<SkippedSample>,
}

impl TitrationCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_volume(&self) -> Option<f64> {
        self.points.last().map(|p| p.volume)
    }
}

/// What to do when a curve sample hits a logarithm of a non-positive number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainErrorPolicy {
    #[default]
    Skip,
    Abort,
}

impl FromStr for DomainErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(DomainErrorPolicy::Skip),
            "abort" => Ok(DomainErrorPolicy::Abort),
            other => Err(format!(
                "unknown domain error policy '{}', expected 'skip' or 'abort'",
                other
            )),
        }
    }
}

impl fmt::Display for DomainErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainErrorPolicy::Skip => f.write_str("skip"),
            DomainErrorPolicy::Abort => f.write_str("abort"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorPhase {
    Acidic,
    Transition,
    Basic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verdict {
    Suitable,
    Unsuitable { equivalence_ph: f64 },
}

impl Verdict {
    pub fn is_suitable(&self) -> bool {
        matches!(self, Verdict::Suitable)
    }
}

/// Everything the presentation side needs to draw one titration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitrationReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub params: TitrationParams,
    pub indicator: IndicatorSpec,
    pub curve: TitrationCurve,
    pub equivalence_volume: f64,
    pub equivalence_ph: f64,
    pub current_volume: f64,
    pub current_ph: f64,
    pub phase: IndicatorPhase,
    pub color: Rgb,
    pub verdict: Verdict,
    pub suitable_indicators: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parse_and_display() {
        let color: Rgb = "#ffc0cb".parse().unwrap();
        assert_eq!(color, Rgb::new(0xFF, 0xC0, 0xCB));
        assert_eq!(color.to_string(), "#FFC0CB");
        assert_eq!(Rgb::from_u32(0x00FF00), Rgb::new(0, 255, 0));

        assert!("FFC0CB".parse::<Rgb>().is_err());
        assert!("#FFC0C".parse::<Rgb>().is_err());
        assert!("#GGGGGG".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(255, 69, 0)).unwrap();
        assert_eq!(json, "\"#FF4500\"");

        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::new(255, 69, 0));
    }

    #[test]
    fn test_domain_error_policy_from_str() {
        assert_eq!("skip".parse::<DomainErrorPolicy>(), Ok(DomainErrorPolicy::Skip));
        assert_eq!(" Abort ".parse::<DomainErrorPolicy>(), Ok(DomainErrorPolicy::Abort));
        assert!("retry".parse::<DomainErrorPolicy>().is_err());
        assert_eq!(DomainErrorPolicy::default(), DomainErrorPolicy::Skip);
    }

    #[test]
    fn test_strength_constant() {
        assert_eq!(Strength::Strong.constant(), None);
        assert_eq!(Strength::Weak(1.8e-5).constant(), Some(1.8e-5));
        assert!(Strength::Strong.is_strong());
    }
}
