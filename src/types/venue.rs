use serde::{Deserialize, Serialize};

use super::form::{FormData, FormError};

/// Fields submitted by the create and edit venue forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_form(form: &FormData) -> Result<Self, FormError> {
        Ok(Self {
            name: form.require("name")?,
            city: form.require("city")?,
            state: form.require("state")?,
            address: form.require("address")?,
            phone: form.optional("phone"),
            genres: form.require_all("genres")?,
            image_link: form.optional("image_link"),
            facebook_link: form.optional("facebook_link"),
            website: form.optional("website"),
            seeking_talent: form.contains("seeking_talent"),
            seeking_description: form.optional("seeking_description"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSummary {
    pub id: u64,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreasResponse {
    pub success: bool,
    pub areas: Vec<Area>,
}

/// A show as listed on a venue page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueShow {
    pub artist_id: u64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueDetail {
    pub id: u64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form() {
        let form = FormData::parse(
            b"name=The+Dueling+Pianos+Bar&city=New+York&state=NY&address=335+Delancey+Street\
              &phone=914-003-1132&genres=Classical&genres=R%26B&genres=Hip-Hop\
              &website=&facebook_link=https%3A%2F%2Fwww.facebook.com%2Ftheduelingpianos\
              &image_link=&seeking_description=",
        );
        let venue = VenueForm::from_form(&form).unwrap();
        assert_eq!(venue.name, "The Dueling Pianos Bar");
        assert_eq!(venue.city, "New York");
        assert_eq!(venue.genres, vec!["Classical", "R&B", "Hip-Hop"]);
        assert_eq!(venue.phone.as_deref(), Some("914-003-1132"));
        assert_eq!(venue.website, None);
        assert!(!venue.seeking_talent);

        let form = FormData::parse(b"name=Park+Square&city=San+Francisco&state=CA");
        assert_eq!(
            VenueForm::from_form(&form),
            Err(FormError::Missing("address"))
        );
    }
}
