use crate::domain::model::DomainErrorPolicy;
use crate::utils::error::Result;

/// Where exported curves and reports end up.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Raw user selections, before catalog lookup.
pub trait ConfigProvider {
    fn acid(&self) -> &str;
    fn base(&self) -> &str;
    fn indicator(&self) -> &str;
    fn acid_concentration(&self) -> f64;
    fn acid_volume(&self) -> f64;
    fn base_concentration(&self) -> f64;
    fn titrant_volume(&self) -> Option<f64>;
    fn domain_error_policy(&self) -> DomainErrorPolicy;
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];
}
