pub mod config;
pub mod domain;
pub mod utils;

pub use config::RecordsConfig;
pub use domain::model::Mapping;
pub use domain::ports::{JsonEncoder, JsonRecord, PlainEncoder};
pub use domain::sequence::{Interval, ParameterValue, Sequence, SequenceRow};
pub use domain::user::User;
pub use utils::error::{RecordError, Result};
