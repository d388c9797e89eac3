use serde::{Deserialize, Serialize};

use crate::time;

use super::form::{FormData, FormError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowForm {
    pub artist_id: u64,
    pub venue_id: u64,
    pub start_time: i64,
}

impl ShowForm {
    pub fn from_form(form: &FormData) -> Result<Self, FormError> {
        let artist_id = form.require_id("artist_id")?;
        let venue_id = form.require_id("venue_id")?;
        let start_time = form.require("start_time")?;
        let start_time = time::parse_time(&start_time).map_err(|e| FormError::Invalid {
            field: "start_time",
            reason: format!("{e:#}"),
        })?;
        Ok(Self {
            artist_id,
            venue_id,
            start_time,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowListing {
    pub venue_id: u64,
    pub venue_name: String,
    pub artist_id: u64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowsResponse {
    pub success: bool,
    pub shows: Vec<ShowListing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form() {
        let form = FormData::parse(b"artist_id=1&venue_id=2&start_time=1900000000");
        assert_eq!(
            ShowForm::from_form(&form).unwrap(),
            ShowForm {
                artist_id: 1,
                venue_id: 2,
                start_time: 1900000000,
            }
        );

        let form = FormData::parse(b"artist_id=1&venue_id=2&start_time=someday");
        assert!(matches!(
            ShowForm::from_form(&form),
            Err(FormError::Invalid {
                field: "start_time",
                ..
            })
        ));

        let form = FormData::parse(b"artist_id=1&start_time=1900000000");
        assert_eq!(
            ShowForm::from_form(&form),
            Err(FormError::Missing("venue_id"))
        );
    }
}
