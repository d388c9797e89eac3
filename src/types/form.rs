use serde::Serialize;
use thiserror::Error;
use url::form_urlencoded;

pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("missing field '{0}'")]
    Missing(&'static str),

    #[error("invalid field '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// An edit or create form as handed to a client: the current values plus
/// the choices for the select fields.
#[derive(Debug, Clone, Serialize)]
pub struct FormTemplate<T: Serialize> {
    pub success: bool,
    /// Row being edited, absent on create forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub form: T,
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl<T: Serialize> FormTemplate<T> {
    pub fn new(form: T) -> Self {
        Self {
            success: true,
            id: None,
            form,
            genres: GENRE_CHOICES,
            states: STATE_CHOICES,
        }
    }

    pub fn edit(id: u64, form: T) -> Self {
        let mut template = Self::new(form);
        template.id = Some(id);
        template
    }
}

/// Decoded `application/x-www-form-urlencoded` body. Keys may repeat, which
/// is how multi-select fields such as `genres` arrive.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        let fields = form_urlencoded::parse(body)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// A repeated field with at least one non-blank value.
    pub fn require_all(&self, key: &'static str) -> Result<Vec<String>, FormError> {
        let values: Vec<String> = self
            .get_all(key)
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        if values.is_empty() {
            return Err(FormError::Missing(key));
        }
        Ok(values)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// A required, non-blank field.
    pub fn require(&self, key: &'static str) -> Result<String, FormError> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(FormError::Missing(key)),
        }
    }

    /// An optional field; blank values are treated as absent.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    }

    pub fn require_id(&self, key: &'static str) -> Result<u64, FormError> {
        let value = self.require(key)?;
        value.parse::<u64>().map_err(|_| FormError::Invalid {
            field: key,
            reason: format!("'{value}' is not an id"),
        })
    }
}
