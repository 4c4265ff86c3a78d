//! Detail view of a single library.
//!
//! Holds what the page shows: the fetched record, the selected photo and the
//! data derived for the static map. Every fetch is tagged with a ticket, and
//! a response whose ticket is no longer current is dropped, so navigating to
//! another library while a request is in flight never shows stale data.

use std::fmt;

use super::api::{ClientResult, LibrariesClient};
use crate::views::{ImageView, LibraryView};

/// Zoom level of the embedded map
pub const MAP_ZOOM: u8 = 16;

const TILE_URL: &str = "https://api.mapbox.com/styles/v1/mapbox/light-v10/tiles/256/{z}/{x}/{y}@2x";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(LibraryView),
    Failed(String),
}

/// Identifies one fetch started by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub library_id: i32,
    generation: u64,
}

/// Non-interactive map centered on a library
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMap {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub interactive: bool,
    /// Tile URL template with `{z}`, `{x}`, `{y}` placeholders
    pub tile_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekendBadge {
    Opens,
    Closed,
}

impl WeekendBadge {
    pub fn label(self) -> &'static str {
        match self {
            WeekendBadge::Opens => "Open on weekends",
            WeekendBadge::Closed => "Closed on weekends",
        }
    }
}

#[derive(Debug)]
pub struct DetailView {
    library_id: i32,
    generation: u64,
    state: LoadState,
    active_image_index: usize,
    map_token: String,
}

impl DetailView {
    pub fn new(library_id: i32, map_token: impl Into<String>) -> Self {
        Self {
            library_id,
            generation: 0,
            state: LoadState::Loading,
            active_image_index: 0,
            map_token: map_token.into(),
        }
    }

    pub fn library_id(&self) -> i32 {
        self.library_id
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn library(&self) -> Option<&LibraryView> {
        match &self.state {
            LoadState::Ready(library) => Some(library),
            _ => None,
        }
    }

    /// Start a fetch for the current library; older tickets become stale
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchTicket {
            library_id: self.library_id,
            generation: self.generation,
        }
    }

    /// Route parameter changed. Returns a ticket when a new fetch is needed.
    pub fn set_library_id(&mut self, library_id: i32) -> Option<FetchTicket> {
        if library_id == self.library_id {
            return None;
        }
        self.library_id = library_id;
        self.active_image_index = 0;
        Some(self.begin_fetch())
    }

    /// Apply a fetch result. Returns `false` when the ticket was stale.
    pub fn apply(&mut self, ticket: FetchTicket, result: ClientResult<LibraryView>) -> bool {
        if ticket.generation != self.generation || ticket.library_id != self.library_id {
            tracing::debug!("Dropping stale response for library {}", ticket.library_id);
            return false;
        }

        self.state = match result {
            Ok(library) => LoadState::Ready(library),
            Err(e) => LoadState::Failed(e.to_string()),
        };
        self.active_image_index = 0;
        true
    }

    /// Fetch the current library and apply the result
    pub async fn load(&mut self, client: &LibrariesClient) {
        let ticket = self.begin_fetch();
        let result = client.fetch_library(ticket.library_id).await;
        self.apply(ticket, result);
    }

    /// Select a photo of the gallery; out of range indexes are ignored
    pub fn select_image(&mut self, index: usize) -> bool {
        let count = self.library().map_or(0, |l| l.images.len());
        if index >= count {
            return false;
        }
        self.active_image_index = index;
        true
    }

    pub fn active_image_index(&self) -> usize {
        self.active_image_index
    }

    pub fn active_image(&self) -> Option<&ImageView> {
        self.library()?.images.get(self.active_image_index)
    }

    pub fn map(&self) -> Option<StaticMap> {
        let library = self.library()?;
        Some(StaticMap {
            latitude: library.latitude,
            longitude: library.longitude,
            zoom: MAP_ZOOM,
            interactive: false,
            tile_url: format!("{}?access_token={}", TILE_URL, self.map_token),
        })
    }

    /// Route planner link to the library
    pub fn directions_url(&self) -> Option<String> {
        let library = self.library()?;
        Some(format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}",
            library.latitude, library.longitude
        ))
    }

    pub fn weekend_badge(&self) -> Option<WeekendBadge> {
        self.library().map(|library| {
            if library.open_on_weekends {
                WeekendBadge::Opens
            } else {
                WeekendBadge::Closed
            }
        })
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let library = match &self.state {
            LoadState::Loading => return writeln!(f, "Loading..."),
            LoadState::Failed(message) => {
                return writeln!(f, "Could not load library {}: {}", self.library_id, message)
            }
            LoadState::Ready(library) => library,
        };

        writeln!(f, "{}", library.name)?;
        writeln!(f, "{}", "=".repeat(library.name.chars().count()))?;
        writeln!(f)?;

        match self.active_image() {
            Some(image) => writeln!(f, "Photo: {}", image.url)?,
            None => writeln!(f, "No photos")?,
        }
        for (index, image) in library.images.iter().enumerate() {
            let marker = if index == self.active_image_index { '*' } else { ' ' };
            writeln!(f, " {} [{}] {}", marker, index, image.url)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", library.about)?;
        writeln!(f)?;

        if let Some(map) = self.map() {
            writeln!(
                f,
                "Map: {:.6}, {:.6} (zoom {})",
                map.latitude, map.longitude, map.zoom
            )?;
        }
        if let Some(url) = self.directions_url() {
            writeln!(f, "Directions: {}", url)?;
        }
        writeln!(f)?;

        writeln!(f, "Monday to Friday: {}", library.opening_hours)?;
        if let Some(badge) = self.weekend_badge() {
            writeln!(f, "{}", badge.label())?;
        }
        writeln!(f)?;

        writeln!(f, "Phone: {}", library.phone)?;
        writeln!(f, "Website: {}", library.website)?;
        writeln!(f, "Facebook: {}", library.facebook)?;
        writeln!(f, "Instagram: {}", library.instagram)
    }
}
