use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_DAYS: u32 = 5;
pub const DEFAULT_GROUP_SIZE: u32 = 2;
pub const DEFAULT_STAY_PREF: &str = "Doesn't matter, base on my budget and comfort level";

/// Parameters describing the requested trip. Missing or unparseable
/// fields fall back to documented defaults rather than rejecting the
/// request; the struct is immutable for the lifetime of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TripParameters {
    pub origin: String,
    pub destinations: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub budget: String,
    #[serde(deserialize_with = "lenient_days")]
    pub days: u32,
    pub currency: String,
    #[serde(rename = "groupSize", deserialize_with = "lenient_group_size")]
    pub group_size: u32,
    #[serde(rename = "comfortLevel")]
    pub comfort_level: String,
    pub theme: String,
    #[serde(rename = "additionalInfo")]
    pub additional_info: String,
    #[serde(rename = "stayPref")]
    pub stay_pref: String,
}

impl Default for TripParameters {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destinations: Vec::new(),
            budget: String::new(),
            days: DEFAULT_DAYS,
            currency: "USD".to_string(),
            group_size: DEFAULT_GROUP_SIZE,
            comfort_level: "moderate".to_string(),
            theme: "general".to_string(),
            additional_info: String::new(),
            stay_pref: DEFAULT_STAY_PREF.to_string(),
        }
    }
}

impl TripParameters {
    /// All destinations joined into the single label used in prompts
    /// and in the document title.
    pub fn destinations_label(&self) -> String {
        self.destinations.join(";")
    }

    /// First destination, used for the illustrative image request.
    pub fn first_destination(&self) -> Option<&str> {
        self.destinations
            .iter()
            .map(|d| d.as_str())
            .find(|d| !d.trim().is_empty())
    }

    /// Document title. The theme is only mentioned when it differs from
    /// the "general" default.
    pub fn title(&self) -> String {
        let destinations = self.destinations_label();
        if self.theme == "general" {
            format!("{}-Day Trip from {} to {}", self.days, self.origin, destinations)
        } else {
            format!(
                "{}-Day {} Trip from {} to {}",
                self.days, self.theme, self.origin, destinations
            )
        }
    }
}

/// Accepts a JSON string or number; budgets arrive either way.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Number(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Number(n) => {
            if n.fract() == 0.0 {
                format!("{}", n as i64)
            } else {
                n.to_string()
            }
        }
    })
}

fn lenient_u32<'de, D>(deserializer: D, fallback: u32) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntLike {
        Number(f64),
        Text(String),
    }

    let value = match IntLike::deserialize(deserializer)? {
        IntLike::Number(n) if n >= 1.0 => n as u32,
        IntLike::Number(_) => fallback,
        IntLike::Text(text) => text.trim().parse::<u32>().unwrap_or(fallback).max(1),
    };
    Ok(value.max(1))
}

fn lenient_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_u32(deserializer, DEFAULT_DAYS)
}

fn lenient_group_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_u32(deserializer, DEFAULT_GROUP_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let params: TripParameters = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.days, 5);
        assert_eq!(params.group_size, 2);
        assert_eq!(params.currency, "USD");
        assert_eq!(params.comfort_level, "moderate");
        assert_eq!(params.theme, "general");
        assert_eq!(params.stay_pref, DEFAULT_STAY_PREF);
    }

    #[test]
    fn numeric_fields_coerce_from_strings_and_numbers() {
        let params: TripParameters = serde_json::from_value(json!({
            "days": "3",
            "groupSize": 4,
            "budget": 3000
        }))
        .unwrap();
        assert_eq!(params.days, 3);
        assert_eq!(params.group_size, 4);
        assert_eq!(params.budget, "3000");
    }

    #[test]
    fn unparseable_numbers_fall_back_to_defaults() {
        let params: TripParameters = serde_json::from_value(json!({
            "days": "next week",
            "groupSize": "a few"
        }))
        .unwrap();
        assert_eq!(params.days, 5);
        assert_eq!(params.group_size, 2);
    }

    #[test]
    fn title_mentions_theme_only_when_set() {
        let mut params = TripParameters {
            origin: "Boston".to_string(),
            destinations: vec!["Tokyo".to_string()],
            days: 3,
            ..TripParameters::default()
        };
        assert_eq!(params.title(), "3-Day Trip from Boston to Tokyo");

        params.theme = "food".to_string();
        assert_eq!(params.title(), "3-Day food Trip from Boston to Tokyo");
    }

    #[test]
    fn destinations_join_with_semicolons() {
        let params = TripParameters {
            destinations: vec!["Tokyo".to_string(), "Kyoto".to_string()],
            ..TripParameters::default()
        };
        assert_eq!(params.destinations_label(), "Tokyo;Kyoto");
        assert_eq!(params.first_destination(), Some("Tokyo"));
    }
}
