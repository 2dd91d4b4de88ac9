//! Static copy for the landing page.

use serde::Serialize;

pub const PRODUCT_NAME: &str = "AgriSmart AI";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat {
        value: "99%",
        label: "Prediction Accuracy",
        description: "Using Random Forest Classifier",
    },
    Stat {
        value: "22+",
        label: "Crop Types",
        description: "Supported crop recommendations",
    },
    Stat {
        value: "7",
        label: "Parameters Analyzed",
        description: "N, P, K, pH, Temp, Humidity, Rainfall",
    },
    Stat {
        value: "AI",
        label: "Powered by Gemini",
        description: "Intelligent farming assistance",
    },
];

/// One input on the prediction form. `name` matches the `SoilForm` field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub unit: &'static str,
}

pub const SOIL_FIELDS: [FieldSpec; 7] = [
    FieldSpec {
        name: "nitrogen",
        label: "Nitrogen (N)",
        placeholder: "e.g., 90",
        unit: "kg/ha",
    },
    FieldSpec {
        name: "phosphorus",
        label: "Phosphorus (P)",
        placeholder: "e.g., 42",
        unit: "kg/ha",
    },
    FieldSpec {
        name: "potassium",
        label: "Potassium (K)",
        placeholder: "e.g., 43",
        unit: "kg/ha",
    },
    FieldSpec {
        name: "ph",
        label: "pH Level",
        placeholder: "e.g., 6.5",
        unit: "pH",
    },
    FieldSpec {
        name: "temperature",
        label: "Temperature",
        placeholder: "e.g., 25",
        unit: "°C",
    },
    FieldSpec {
        name: "humidity",
        label: "Humidity",
        placeholder: "e.g., 80",
        unit: "%",
    },
    FieldSpec {
        name: "rainfall",
        label: "Rainfall",
        placeholder: "e.g., 200",
        unit: "mm",
    },
];
