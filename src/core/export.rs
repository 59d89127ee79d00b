use crate::domain::model::{CurvePoint, TitrationReport};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, TitrationError};

pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];
pub const DEFAULT_CSV_FILENAME: &str = "curve.csv";
pub const DEFAULT_JSON_FILENAME: &str = "report.json";

pub fn curve_to_csv(points: &[CurvePoint]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in points {
        writer.serialize(point)?;
    }
    writer
        .into_inner()
        .map_err(|e| TitrationError::IoError(e.into_error()))
}

pub struct ReportExporter<S: Storage> {
    storage: S,
    csv_filename: String,
    json_filename: String,
}

impl<S: Storage> ReportExporter<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            csv_filename: DEFAULT_CSV_FILENAME.to_string(),
            json_filename: DEFAULT_JSON_FILENAME.to_string(),
        }
    }

    pub fn with_filenames(mut self, csv: Option<&str>, json: Option<&str>) -> Self {
        if let Some(csv) = csv {
            self.csv_filename = csv.to_string();
        }
        if let Some(json) = json {
            self.json_filename = json.to_string();
        }
        self
    }

    /// Writes one file per requested format and returns the written names.
    pub fn export(&self, report: &TitrationReport, formats: &[String]) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in formats {
            match format.as_str() {
                "csv" => {
                    let data = curve_to_csv(&report.curve.points)?;
                    self.storage.write_file(&self.csv_filename, &data)?;
                    written.push(self.csv_filename.clone());
                }
                "json" => {
                    let data = serde_json::to_vec_pretty(report)?;
                    self.storage.write_file(&self.json_filename, &data)?;
                    written.push(self.json_filename.clone());
                }
                other => {
                    return Err(TitrationError::InvalidConfigValueError {
                        field: "output.formats".to_string(),
                        value: other.to_string(),
                        reason: format!(
                            "Unsupported format. Valid formats: {}",
                            SUPPORTED_FORMATS.join(", ")
                        ),
                    })
                }
            }
            tracing::debug!("Exported {} output", format);
        }

        Ok(written)
    }
}
