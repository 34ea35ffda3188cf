//! Sensor projections of the bill document
//!
//! Each requested field becomes one read-only sensor carrying static display
//! metadata and the last known value. Sensors never observe faults: a failed
//! or sentinel fetch simply leaves the previous value in place.

use crate::bill::{self, BillField};
use crate::config::Config;
use serde_json::Value;

/// Prefix for stable sensor identifiers
const SENSOR_PREFIX: &str = "mahadiscom_";

/// Grouping identity for all sensors of one consumer account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Grouping identifier derived from the consumer number
    pub identifier: String,
    pub name: String,
    pub manufacturer: String,
}

impl DeviceInfo {
    fn for_consumer(consumer_number: &str) -> Self {
        Self {
            identifier: consumer_number.to_string(),
            name: "Mahadiscom Energy Meter".to_string(),
            manufacturer: "Mahadiscom".to_string(),
        }
    }
}

/// One named readable value projected from the bill document
#[derive(Debug, Clone)]
pub struct Sensor {
    field: BillField,
    device: DeviceInfo,
    state: Option<Value>,
}

impl Sensor {
    /// Create a sensor for one field; its value is undefined until the first
    /// successful fetch
    pub fn new(field: BillField, consumer_number: &str) -> Self {
        Self {
            field,
            device: DeviceInfo::for_consumer(consumer_number),
            state: None,
        }
    }

    /// The field this sensor projects
    pub fn field(&self) -> BillField {
        self.field
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.field.label()
    }

    /// Icon identifier
    pub fn icon(&self) -> &'static str {
        self.field.icon()
    }

    /// Unit of measurement, where one applies
    pub fn unit(&self) -> Option<&'static str> {
        self.field.unit()
    }

    /// Stable identifier derived from the field name
    pub fn unique_id(&self) -> String {
        format!("{}{}", SENSOR_PREFIX, self.field.key())
    }

    /// Grouping identity shared by all sensors of the account
    pub fn device_info(&self) -> &DeviceInfo {
        &self.device
    }

    /// Last known value; `None` until at least one successful fetch
    pub fn state(&self) -> Option<&Value> {
        self.state.as_ref()
    }

    /// Refresh from the current document. An absent document, the error
    /// sentinel, or a missing key keeps the previous value (stale-but-present).
    pub fn update(&mut self, document: Option<&Value>) {
        if let Some(doc) = document
            && let Some(value) = bill::extract(doc, self.field)
        {
            self.state = Some(value);
        }
    }
}

/// Build one sensor per requested field, in configuration order
pub fn build_sensors(config: &Config) -> Vec<Sensor> {
    config
        .requested_fields()
        .into_iter()
        .map(|field| Sensor::new(field, &config.account.consumer_number))
        .collect()
}
