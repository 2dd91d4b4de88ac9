//! Soil and weather parameters entered on the prediction form.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Raw form values exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilForm {
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub ph: String,
    pub temperature: String,
    pub humidity: String,
    pub rainfall: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoilFormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a number, got {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

/// A coerced sample, ready to be sent to the prediction service.
///
/// Field order is the wire order expected by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilSample {
    #[serde(serialize_with = "number")]
    pub nitrogen: f64,
    #[serde(serialize_with = "number")]
    pub phosphorus: f64,
    #[serde(serialize_with = "number")]
    pub potassium: f64,
    #[serde(serialize_with = "number")]
    pub temperature: f64,
    #[serde(serialize_with = "number")]
    pub humidity: f64,
    #[serde(serialize_with = "number")]
    pub ph: f64,
    #[serde(serialize_with = "number")]
    pub rainfall: f64,
}

impl SoilForm {
    /// Coerce every field to a number. Blank fields and non-numeric text are
    /// rejected; there is no range validation.
    pub fn to_sample(&self) -> Result<SoilSample, SoilFormError> {
        Ok(SoilSample {
            nitrogen: coerce("nitrogen", &self.nitrogen)?,
            phosphorus: coerce("phosphorus", &self.phosphorus)?,
            potassium: coerce("potassium", &self.potassium)?,
            temperature: coerce("temperature", &self.temperature)?,
            humidity: coerce("humidity", &self.humidity)?,
            ph: coerce("ph", &self.ph)?,
            rainfall: coerce("rainfall", &self.rainfall)?,
        })
    }

    /// Look up a raw value by its form field name.
    pub fn value(&self, name: &str) -> Option<&str> {
        let value = match name {
            "nitrogen" => &self.nitrogen,
            "phosphorus" => &self.phosphorus,
            "potassium" => &self.potassium,
            "ph" => &self.ph,
            "temperature" => &self.temperature,
            "humidity" => &self.humidity,
            "rainfall" => &self.rainfall,
            _ => return None,
        };
        Some(value.as_str())
    }
}

fn coerce(field: &'static str, raw: &str) -> Result<f64, SoilFormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SoilFormError::Missing(field));
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SoilFormError::NotNumeric {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Integral values go out as JSON integers (`90`, not `90.0`).
fn number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled() -> SoilForm {
        SoilForm {
            nitrogen: "90".into(),
            phosphorus: "42".into(),
            potassium: "43".into(),
            ph: "6.5".into(),
            temperature: " 20.87 ".into(),
            humidity: "82".into(),
            rainfall: "202.9".into(),
        }
    }

    #[test]
    fn coerces_text_to_numbers() {
        let sample = filled().to_sample().unwrap();
        assert_eq!(sample.nitrogen, 90.0);
        assert_eq!(sample.ph, 6.5);
        assert_eq!(sample.temperature, 20.87);
    }

    #[test]
    fn serializes_with_wire_keys_and_integers() {
        let body = serde_json::to_value(filled().to_sample().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "nitrogen": 90,
                "phosphorus": 42,
                "potassium": 43,
                "temperature": 20.87,
                "humidity": 82,
                "ph": 6.5,
                "rainfall": 202.9
            })
        );
    }

    #[test]
    fn wire_key_order_is_fixed() {
        let body = serde_json::to_string(&filled().to_sample().unwrap()).unwrap();
        let keys: Vec<usize> = [
            "nitrogen",
            "phosphorus",
            "potassium",
            "temperature",
            "humidity",
            "ph",
            "rainfall",
        ]
        .iter()
        .map(|k| body.find(&format!("\"{k}\"")).unwrap())
        .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn blank_field_is_missing() {
        let mut form = filled();
        form.rainfall = "   ".into();
        assert_eq!(form.to_sample(), Err(SoilFormError::Missing("rainfall")));
    }

    #[test]
    fn text_and_non_finite_values_are_rejected() {
        let mut form = filled();
        form.ph = "acidic".into();
        assert!(matches!(
            form.to_sample(),
            Err(SoilFormError::NotNumeric { field: "ph", .. })
        ));

        form.ph = "inf".into();
        assert!(form.to_sample().is_err());
    }

    #[test]
    fn value_lookup_by_field_name() {
        let form = filled();
        assert_eq!(form.value("ph"), Some("6.5"));
        assert_eq!(form.value("sunlight"), None);
    }
}
