use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const DISEASE_PREDICT_PATH: &str = "/api/disease/predict";
pub const DISEASE_HISTORY_PATH: &str = "/api/disease/history";
pub const YIELD_PREDICT_PATH: &str = "/api/yield/predict";
pub const YIELD_HISTORY_PATH: &str = "/api/yield/history";

/// Multipart field name the prediction service reads the leaf image from.
pub const IMAGE_FIELD: &str = "image";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// User object returned next to the access token. Every field is optional
/// since the auth service is free to send any subset of them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct UserPayload {
    pub id: Option<i64>,
    pub sub: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: UserPayload,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter,
)]
pub enum ModelVariant {
    #[default]
    #[serde(rename = "CNN")]
    #[strum(serialize = "CNN")]
    Cnn,
    #[serde(rename = "ViT")]
    #[strum(serialize = "ViT")]
    Vit,
}

impl ModelVariant {
    pub fn label(self) -> &'static str {
        match self {
            ModelVariant::Cnn => "CNN (MobileNetV2)",
            ModelVariant::Vit => "Vision Transformer (ViT)",
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter,
    IntoStaticStr,
)]
pub enum Season {
    #[default]
    Kharif,
    Rabi,
    Zayad,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter,
    IntoStaticStr,
)]
pub enum Variety {
    Desi,
    #[default]
    Hybrid,
    Cherry,
    Beefsteak,
}

/// Body of `POST /api/yield/predict`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct YieldRequest {
    pub season: Season,
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    pub organic_carbon: f64,
    pub variety: Variety,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiseaseResponse {
    pub disease: String,
    pub confidence: f64,
    pub treatment_advice: String,
    #[serde(default)]
    pub all_predictions: HashMap<String, f64>,
    #[serde(default)]
    pub model_used: Option<String>,
}

impl DiseaseResponse {
    /// Per-class probabilities, most likely first. Ties keep a stable
    /// alphabetical order so the panel does not reshuffle between renders.
    pub fn ranked_predictions(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .all_predictions
            .iter()
            .map(|(label, p)| (label.as_str(), *p))
            .collect();
        ranked.sort_by(|(la, a), (lb, b)| {
            b.partial_cmp(a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| la.cmp(lb))
        });
        ranked
    }
}

/// Origin of a yield figure. Anything other than `ml` is reported as a
/// heuristic estimate.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PredictionType {
    Ml,
    Heuristic,
}

impl From<String> for PredictionType {
    fn from(value: String) -> Self {
        if value == "ml" {
            PredictionType::Ml
        } else {
            PredictionType::Heuristic
        }
    }
}

impl From<PredictionType> for String {
    fn from(value: PredictionType) -> Self {
        match value {
            PredictionType::Ml => "ml".to_string(),
            PredictionType::Heuristic => "heuristic".to_string(),
        }
    }
}

impl PredictionType {
    pub fn label(self) -> &'static str {
        match self {
            PredictionType::Ml => "Machine Learning",
            PredictionType::Heuristic => "Heuristic",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct YieldResponse {
    pub predicted_yield: f64,
    pub prediction_type: PredictionType,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiseaseHistoryEntry {
    pub id: i64,
    pub disease: String,
    pub confidence: f64,
    pub model_type: String,
    pub date: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct YieldHistoryEntry {
    pub id: i64,
    pub season: String,
    pub predicted_yield: f64,
    pub prediction_type: PredictionType,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_response_tolerates_sparse_user() {
        let parsed: AuthResponse =
            serde_json::from_value(json!({"access_token": "T", "user": {"sub": "alice"}})).unwrap();
        assert_eq!(parsed.access_token, "T");
        assert_eq!(parsed.user.sub.as_deref(), Some("alice"));
        assert!(parsed.user.email.is_none());
        assert!(parsed.token_type.is_none());
    }

    #[test]
    fn test_signup_request_omits_empty_optionals() {
        let req = SignupRequest {
            username: "bob".into(),
            email: "bob@farm.in".into(),
            password: "pw".into(),
            full_name: None,
            phone: Some("123".into()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("full_name").is_none());
        assert_eq!(value["phone"], "123");
    }

    #[test]
    fn test_model_variant_wire_names() {
        assert_eq!(ModelVariant::Cnn.as_ref(), "CNN");
        assert_eq!(ModelVariant::Vit.as_ref(), "ViT");
        assert_eq!("ViT".parse::<ModelVariant>().unwrap(), ModelVariant::Vit);
        assert_eq!(serde_json::to_value(ModelVariant::Vit).unwrap(), json!("ViT"));
    }

    #[test]
    fn test_yield_request_uses_snake_case_fields() {
        let req = YieldRequest {
            season: Season::Rabi,
            temperature: 25.0,
            rainfall: 150.0,
            humidity: 75.0,
            nitrogen: 250.0,
            phosphorus: 70.0,
            potassium: 175.0,
            ph: 6.5,
            organic_carbon: 0.8,
            variety: Variety::Cherry,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["season"], "Rabi");
        assert_eq!(value["variety"], "Cherry");
        assert_eq!(value["organic_carbon"], 0.8);
    }

    #[test]
    fn test_prediction_type_unknown_is_heuristic() {
        let parsed: YieldResponse = serde_json::from_value(json!({
            "predicted_yield": 14.2,
            "prediction_type": "rule-based",
            "recommendations": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(parsed.prediction_type, PredictionType::Heuristic);
        assert_eq!(parsed.recommendations, vec!["a", "b"]);

        let ml: PredictionType = serde_json::from_value(json!("ml")).unwrap();
        assert_eq!(ml.label(), "Machine Learning");
    }

    #[test]
    fn test_ranked_predictions_orders_by_probability() {
        let resp: DiseaseResponse = serde_json::from_value(json!({
            "disease": "Early_blight",
            "confidence": 0.7,
            "treatment_advice": "Apply fungicide.",
            "all_predictions": {"Healthy": 0.1, "Early_blight": 0.7, "Late_blight": 0.1, "Leaf Miner": 0.1},
            "model_used": "CNN"
        }))
        .unwrap();
        let ranked = resp.ranked_predictions();
        assert_eq!(ranked[0], ("Early_blight", 0.7));
        assert_eq!(ranked[1].0, "Healthy");
        assert_eq!(ranked[2].0, "Late_blight");
        assert_eq!(ranked[3].0, "Leaf Miner");
    }

    #[test]
    fn test_disease_response_without_breakdown() {
        let resp: DiseaseResponse = serde_json::from_value(json!({
            "disease": "Healthy",
            "confidence": 0.99,
            "treatment_advice": "Keep going."
        }))
        .unwrap();
        assert!(resp.ranked_predictions().is_empty());
        assert!(resp.model_used.is_none());
    }
}
