use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(CareerId);

impl CareerId {
    /// Parses the value of a `data-career-id` attribute.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }
}

/// Severity class attached to a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_class(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn career_id_parses_trimmed_decimal() {
        assert_eq!(CareerId::parse(" 42 "), Some(CareerId(42)));
        assert_eq!(CareerId::parse("abc"), None);
        assert_eq!(CareerId::parse(""), None);
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        assert_eq!(serde_json::to_string(&CareerId(7)).unwrap(), "7");
        let id: UserId = serde_json::from_str("12").unwrap();
        assert_eq!(id, UserId(12));
    }
}
