pub mod candidate;
pub mod job;

use serde::{Deserialize, Deserializer};

/// Form inputs send lists either as JSON arrays or as `"a, b, c"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCsv {
    List(Vec<String>),
    Csv(String),
}

impl ListOrCsv {
    fn into_items(self) -> Vec<String> {
        let items = match self {
            ListOrCsv::List(items) => items,
            ListOrCsv::Csv(raw) => raw.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// A missing, `null` or blank list is empty.
pub fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ListOrCsv>::deserialize(deserializer)
        .map(|v| v.map(ListOrCsv::into_items).unwrap_or_default())
}

pub fn optional_comma_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ListOrCsv>::deserialize(deserializer).map(|v| v.map(ListOrCsv::into_items))
}

/// Years of experience as forms send them: a number, a numeric string,
/// blank or `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum YearsInput {
    Number(f64),
    Text(String),
}

impl YearsInput {
    /// Blank text yields `None`; negative or non-numeric values are errors.
    fn into_years<E: serde::de::Error>(self) -> Result<Option<u32>, E> {
        let value = match self {
            YearsInput::Number(n) => n,
            YearsInput::Text(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(None);
                }
                raw.parse::<f64>()
                    .map_err(|_| E::custom(format!("'{raw}' is not a number of years")))?
            }
        };
        if !value.is_finite() || value < 0.0 {
            return Err(E::custom(format!("{value} is not a valid number of years")));
        }
        Ok(Some(value.min(f64::from(u32::MAX)) as u32))
    }
}

/// Missing, `null` and blank all mean zero years.
pub fn years<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_years(deserializer)?.unwrap_or(0))
}

pub fn optional_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearsInput>::deserialize(deserializer)? {
        Some(input) => input.into_years(),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "comma_list")]
        skills: Vec<String>,
        #[serde(default, deserialize_with = "optional_comma_list")]
        tags: Option<Vec<String>>,
    }

    #[test]
    fn test_csv_is_split_and_trimmed() {
        let form: Form = serde_json::from_str(r#"{"skills": " Rust, Go ,, SQL "}"#).unwrap();
        assert_eq!(form.skills, vec!["Rust", "Go", "SQL"]);
        assert!(form.tags.is_none());
    }

    #[test]
    fn test_array_is_accepted() {
        let form: Form =
            serde_json::from_str(r#"{"skills": ["React", " "], "tags": "a,b"}"#).unwrap();
        assert_eq!(form.skills, vec!["React"]);
        assert_eq!(form.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_missing_list_defaults_empty() {
        let form: Form = serde_json::from_str("{}").unwrap();
        assert!(form.skills.is_empty());
    }

    #[test]
    fn test_null_list_is_empty() {
        let form: Form = serde_json::from_str(r#"{"skills": null, "tags": null}"#).unwrap();
        assert!(form.skills.is_empty());
        assert!(form.tags.is_none());
    }

    #[derive(Deserialize)]
    struct Profile {
        #[serde(default, deserialize_with = "years")]
        experience: u32,
        #[serde(default, deserialize_with = "optional_years")]
        minimum: Option<u32>,
    }

    fn profile(json: &str) -> Result<Profile, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_years_tolerates_form_shapes() {
        assert_eq!(profile("{}").unwrap().experience, 0);
        assert_eq!(profile(r#"{"experience": null}"#).unwrap().experience, 0);
        assert_eq!(profile(r#"{"experience": ""}"#).unwrap().experience, 0);
        assert_eq!(profile(r#"{"experience": " 5 "}"#).unwrap().experience, 5);
        assert_eq!(profile(r#"{"experience": 7}"#).unwrap().experience, 7);
        assert_eq!(profile(r#"{"experience": 2.5}"#).unwrap().experience, 2);
    }

    #[test]
    fn test_optional_years_blank_is_absent() {
        assert_eq!(profile(r#"{"minimum": ""}"#).unwrap().minimum, None);
        assert_eq!(profile(r#"{"minimum": null}"#).unwrap().minimum, None);
        assert_eq!(profile(r#"{"minimum": "3"}"#).unwrap().minimum, Some(3));
    }

    #[test]
    fn test_years_rejects_garbage_and_negatives() {
        assert!(profile(r#"{"experience": "senior"}"#).is_err());
        assert!(profile(r#"{"experience": -1}"#).is_err());
        assert!(profile(r#"{"experience": "-2"}"#).is_err());
    }
}
