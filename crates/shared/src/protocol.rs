use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{CareerId, UserId};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `true`/`false` as well as the `0`/`1` integers SQLite-backed rows carry.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Int(value)) => value != 0,
        Some(Flag::Float(value)) => value != 0.0,
        None => false,
    })
}

/// Reads an optional integer column that may hold a number, a numeric
/// string, or the blank text a form left behind. Anything unparseable is `None`.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Column {
        Int(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Column>::deserialize(deserializer)? {
        Some(Column::Int(value)) => Some(value),
        Some(Column::Float(value)) if value.is_finite() => Some(value.trunc() as i64),
        Some(Column::Text(text)) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .map(|value| value.trunc() as i64)
            })
        }
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_field: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub years_experience: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub proficiency_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_id: Option<CareerId>,
    pub career_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_salary_min: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_salary_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CareerId>,
    pub career_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_salary_min: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_salary_max: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub growth_rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education_required: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience_required: String,
    #[serde(default, deserialize_with = "flag")]
    pub remote_friendly: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The user-scoped data a successful `/api/user_data` call yields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserSnapshot {
    pub user: Option<User>,
    pub skills: Vec<Skill>,
    pub recommendations: Vec<Recommendation>,
}

impl From<UserDataResponse> for UserSnapshot {
    fn from(value: UserDataResponse) -> Self {
        Self {
            user: value.user,
            skills: value.skills,
            recommendations: value.recommendations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResumeResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CareerDetailsResponse {
    Failure { error: String },
    Detail(Box<CareerDetail>),
}

/// Assessment answers in document order plus the checked interests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentForm {
    pub fields: Vec<(String, String)>,
    pub interests: Vec<String>,
}

impl AssessmentForm {
    pub const INTERESTS_FIELD: &'static str = "interests";

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn with_interest(mut self, interest: impl Into<String>) -> Self {
        self.interests.push(interest.into());
        self
    }

    /// Multipart field list: plain fields first, then one `interests` entry per checked box.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.fields.clone();
        pairs.extend(
            self.interests
                .iter()
                .map(|interest| (Self::INTERESTS_FIELD.to_string(), interest.clone())),
        );
        pairs
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
