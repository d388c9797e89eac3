use serde::{Deserialize, Serialize};

use super::form::{FormData, FormError};

/// Fields submitted by the create and edit artist forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_form(form: &FormData) -> Result<Self, FormError> {
        Ok(Self {
            name: form.require("name")?,
            city: form.require("city")?,
            state: form.require("state")?,
            phone: form.optional("phone"),
            genres: form.require_all("genres")?,
            image_link: form.optional("image_link"),
            facebook_link: form.optional("facebook_link"),
            website: form.optional("website"),
            seeking_venue: form.contains("seeking_venue"),
            seeking_description: form.optional("seeking_description"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistItem {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsResponse {
    pub success: bool,
    pub artists: Vec<ArtistItem>,
}

/// A show as listed on an artist page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistShow {
    pub venue_id: u64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistDetail {
    pub id: u64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}
