use crate::domain::model::Mapping;
use crate::domain::ports::JsonRecord;
use crate::utils::error::Result;
use crate::utils::validation::{validate_finite, Validate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Timing of a repeating pulse pattern: `pulse_train_count` trains, each made
/// of `pulse_count` pulses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sequence {
    /// Interval between pulses (s)
    pub pulse_interval: Interval,
    /// Pulses per train
    pub pulse_count: u32,
    /// Interval between pulse trains (s)
    pub pulse_train_interval: Interval,
    /// Number of pulse trains
    pub pulse_train_count: u32,
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            pulse_interval: Interval::Real(1.0),
            pulse_count: 1,
            pulse_train_interval: Interval::Real(1.0),
            pulse_train_count: 1,
        }
    }
}

/// A duration in seconds, kept in the numeric form it was given in.
///
/// `2` and `2.0` compare unequal and serialize back as written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Interval {
    Whole(i64),
    Real(f64),
}

impl Interval {
    /// Value in seconds as a float.
    pub fn as_secs(self) -> f64 {
        match self {
            Interval::Whole(v) => v as f64,
            Interval::Real(v) => v,
        }
    }

    /// JSON number in the original integer or float form.
    pub fn to_value(self) -> Value {
        match self {
            Interval::Whole(v) => Value::from(v),
            Interval::Real(v) => Value::from(v),
        }
    }
}

impl From<f64> for Interval {
    fn from(value: f64) -> Self {
        Interval::Real(value)
    }
}

impl From<i64> for Interval {
    fn from(value: i64) -> Self {
        Interval::Whole(value)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Whole(v) => write!(f, "{}", v),
            // Debug keeps the trailing ".0" so reals stay distinguishable
            Interval::Real(v) => write!(f, "{:?}", v),
        }
    }
}

/// A table cell holding either an interval or a count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Seconds(Interval),
    Count(u32),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Seconds(v) => write!(f, "{}", v),
            ParameterValue::Count(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceRow {
    pub name: &'static str,
    pub value: ParameterValue,
    pub unit: &'static str,
}

pub const TABLE_HEADER: [&str; 3] = ["Name", "Value", "Unit"];

impl Sequence {
    /// Builds a sequence from explicit parameters, in field order.
    pub fn new(
        pulse_interval: impl Into<Interval>,
        pulse_count: u32,
        pulse_train_interval: impl Into<Interval>,
        pulse_train_count: u32,
    ) -> Self {
        Self {
            pulse_interval: pulse_interval.into(),
            pulse_count,
            pulse_train_interval: pulse_train_interval.into(),
            pulse_train_count,
        }
    }

    /// Parameter summary, always in the same four-row order.
    pub fn to_table(&self) -> Vec<SequenceRow> {
        vec![
            SequenceRow {
                name: "Pulse Interval",
                value: ParameterValue::Seconds(self.pulse_interval),
                unit: "s",
            },
            SequenceRow {
                name: "Pulse Count",
                value: ParameterValue::Count(self.pulse_count),
                unit: "",
            },
            SequenceRow {
                name: "Pulse Train Interval",
                value: ParameterValue::Seconds(self.pulse_train_interval),
                unit: "s",
            },
            SequenceRow {
                name: "Pulse Train Count",
                value: ParameterValue::Count(self.pulse_train_count),
                unit: "",
            },
        ]
    }

    /// Table as comma separated text with a `Name,Value,Unit` header.
    pub fn table_to_csv(&self) -> Result<String> {
        self.write_table(b',')
    }

    /// Table as tab separated text with a `Name,Value,Unit` header.
    pub fn table_to_tsv(&self) -> Result<String> {
        self.write_table(b'\t')
    }

    fn write_table(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer.write_record(TABLE_HEADER)?;
        for row in self.to_table() {
            writer.write_record([row.name, row.value.to_string().as_str(), row.unit])?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// Duration of one train (s).
    pub fn train_duration(&self) -> f64 {
        self.pulse_interval.as_secs() * f64::from(self.pulse_count)
    }

    /// Duration of the whole sequence (s).
    pub fn total_duration(&self) -> f64 {
        self.pulse_train_interval.as_secs() * f64::from(self.pulse_train_count)
    }

    /// Pulses over all trains.
    pub fn total_pulses(&self) -> u64 {
        u64::from(self.pulse_count) * u64::from(self.pulse_train_count)
    }
}

impl JsonRecord for Sequence {
    const RECORD_NAME: &'static str = "sequence";

    fn to_mapping(&self) -> Mapping {
        let mut fields = Mapping::new();
        fields.insert("pulse_interval".to_string(), self.pulse_interval.to_value());
        fields.insert("pulse_count".to_string(), Value::from(self.pulse_count));
        fields.insert(
            "pulse_train_interval".to_string(),
            self.pulse_train_interval.to_value(),
        );
        fields.insert(
            "pulse_train_count".to_string(),
            Value::from(self.pulse_train_count),
        );
        fields
    }

    /// JSON has no representation for NaN or infinity.
    fn ensure_encodable(&self) -> Result<()> {
        self.validate()
    }
}

impl Validate for Sequence {
    fn validate(&self) -> Result<()> {
        validate_finite("pulse_interval", self.pulse_interval.as_secs())?;
        validate_finite("pulse_train_interval", self.pulse_train_interval.as_secs())?;
        Ok(())
    }
}
