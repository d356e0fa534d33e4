use crate::api::{LoginRequest, Season, SignupRequest, Variety, YieldRequest};
use crate::error::ValidationError;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Inputs of the yield forecast form, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum YieldField {
    Season,
    Variety,
    Temperature,
    Rainfall,
    Humidity,
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    OrganicCarbon,
}

impl YieldField {
    pub fn label(self) -> &'static str {
        match self {
            YieldField::Season => "Season",
            YieldField::Variety => "Variety",
            YieldField::Temperature => "Temperature (°C)",
            YieldField::Rainfall => "Rainfall (mm)",
            YieldField::Humidity => "Humidity (%)",
            YieldField::Nitrogen => "Nitrogen (kg/ha)",
            YieldField::Phosphorus => "Phosphorus (kg/ha)",
            YieldField::Potassium => "Potassium (kg/ha)",
            YieldField::Ph => "pH",
            YieldField::OrganicCarbon => "Organic Carbon (%)",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            YieldField::Season => Season::Kharif.into(),
            YieldField::Variety => Variety::Hybrid.into(),
            YieldField::Temperature => "25",
            YieldField::Rainfall => "150",
            YieldField::Humidity => "75",
            YieldField::Nitrogen => "250",
            YieldField::Phosphorus => "70",
            YieldField::Potassium => "175",
            YieldField::Ph => "6.5",
            YieldField::OrganicCarbon => "0.8",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, YieldField::Season | YieldField::Variety)
    }

    /// Input step for numeric fields.
    pub fn step(self) -> &'static str {
        match self {
            YieldField::Ph | YieldField::OrganicCarbon => "0.1",
            _ => "1",
        }
    }

    pub fn numeric() -> impl Iterator<Item = YieldField> {
        YieldField::iter().filter(|f| !f.is_choice())
    }
}

/// Raw text of every yield input. Values stay as typed until submission so
/// a half-typed number never clobbers the field.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldForm {
    values: BTreeMap<YieldField, String>,
}

impl Default for YieldForm {
    fn default() -> Self {
        Self {
            values: YieldField::iter()
                .map(|f| (f, f.default_value().to_string()))
                .collect(),
        }
    }
}

impl YieldForm {
    pub fn get(&self, field: YieldField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Replaces one field, leaving the rest untouched.
    pub fn set(&mut self, field: YieldField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    fn number(&self, field: YieldField) -> Result<f64, ValidationError> {
        let raw = self.get(field).trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingField(field.label()));
        }
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(ValidationError::InvalidNumber(field.label()))
    }

    pub fn to_request(&self) -> Result<YieldRequest, ValidationError> {
        Ok(YieldRequest {
            season: self
                .get(YieldField::Season)
                .parse()
                .map_err(|_| ValidationError::InvalidChoice(YieldField::Season.label()))?,
            temperature: self.number(YieldField::Temperature)?,
            rainfall: self.number(YieldField::Rainfall)?,
            humidity: self.number(YieldField::Humidity)?,
            nitrogen: self.number(YieldField::Nitrogen)?,
            phosphorus: self.number(YieldField::Phosphorus)?,
            potassium: self.number(YieldField::Potassium)?,
            ph: self.number(YieldField::Ph)?,
            organic_carbon: self.number(YieldField::OrganicCarbon)?,
            variety: self
                .get(YieldField::Variety)
                .parse()
                .map_err(|_| ValidationError::InvalidChoice(YieldField::Variety.label()))?,
        })
    }
}

fn required(value: &str, label: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(label))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> Result<LoginRequest, ValidationError> {
        let username = required(&self.username, "Username")?;
        // passwords are sent exactly as typed
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        Ok(LoginRequest {
            username,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub password: String,
}

impl SignupForm {
    pub fn to_request(&self) -> Result<SignupRequest, ValidationError> {
        let username = required(&self.username, "Username")?;
        let email = required(&self.email, "Email")?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        Ok(SignupRequest {
            username,
            email,
            password: self.password.clone(),
            full_name: optional(&self.full_name),
            phone: optional(&self.phone),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yield_defaults() {
        let req = YieldForm::default().to_request().unwrap();
        assert_eq!(req.season, Season::Kharif);
        assert_eq!(req.variety, Variety::Hybrid);
        assert_eq!(req.temperature, 25.0);
        assert_eq!(req.rainfall, 150.0);
        assert_eq!(req.humidity, 75.0);
        assert_eq!(req.nitrogen, 250.0);
        assert_eq!(req.phosphorus, 70.0);
        assert_eq!(req.potassium, 175.0);
        assert_eq!(req.ph, 6.5);
        assert_eq!(req.organic_carbon, 0.8);
    }

    #[test]
    fn test_editing_temperature_leaves_other_fields() {
        let before = YieldForm::default();
        let mut after = before.clone();
        after.set(YieldField::Temperature, "31.5");

        for field in YieldField::iter() {
            if field == YieldField::Temperature {
                assert_eq!(after.get(field), "31.5");
            } else {
                assert_eq!(after.get(field), before.get(field), "{:?} changed", field);
            }
        }
        assert_eq!(after.to_request().unwrap().temperature, 31.5);
    }

    #[test]
    fn test_choice_fields() {
        let mut form = YieldForm::default();
        form.set(YieldField::Season, "Zayad");
        form.set(YieldField::Variety, "Beefsteak");
        let req = form.to_request().unwrap();
        assert_eq!(req.season, Season::Zayad);
        assert_eq!(req.variety, Variety::Beefsteak);

        form.set(YieldField::Variety, "Roma");
        assert_eq!(
            form.to_request(),
            Err(ValidationError::InvalidChoice("Variety"))
        );
    }

    #[test]
    fn test_numeric_validation() {
        let mut form = YieldForm::default();
        form.set(YieldField::Ph, "");
        assert_eq!(form.to_request(), Err(ValidationError::MissingField("pH")));

        form.set(YieldField::Ph, "acidic");
        assert_eq!(form.to_request(), Err(ValidationError::InvalidNumber("pH")));

        form.set(YieldField::Ph, " 7.1 ");
        assert_eq!(form.to_request().unwrap().ph, 7.1);
    }

    #[test]
    fn test_numeric_fields_listing() {
        let numeric: Vec<_> = YieldField::numeric().collect();
        assert_eq!(numeric.len(), 8);
        assert!(!numeric.contains(&YieldField::Season));
        assert_eq!(YieldField::OrganicCarbon.as_ref(), "organic_carbon");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut form = LoginForm::default();
        assert_eq!(form.to_request(), Err(ValidationError::MissingField("Username")));
        form.username = " alice ".into();
        assert_eq!(form.to_request(), Err(ValidationError::MissingField("Password")));
        form.password = " secret ".into();
        let req = form.to_request().unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.password, " secret ");
    }

    #[test]
    fn test_signup_optional_fields() {
        let form = SignupForm {
            username: "ravi".into(),
            email: "ravi@farm.in".into(),
            full_name: "  ".into(),
            phone: "98450".into(),
            password: "pw".into(),
        };
        let req = form.to_request().unwrap();
        assert_eq!(req.full_name, None);
        assert_eq!(req.phone.as_deref(), Some("98450"));

        let missing_email = SignupForm {
            email: String::new(),
            ..form
        };
        assert_eq!(
            missing_email.to_request(),
            Err(ValidationError::MissingField("Email"))
        );
    }
}
