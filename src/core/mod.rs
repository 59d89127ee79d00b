pub mod catalog;
pub mod curve;
pub mod engine;
pub mod export;
pub mod indicator;
pub mod simulation;
pub mod summary;

pub use crate::domain::model::{TitrationCurve, TitrationParams, TitrationReport};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
