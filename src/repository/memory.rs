//! In-memory library store for tests

use std::sync::Mutex;

use async_trait::async_trait;

use super::LibraryStore;
use crate::{
    error::{AppError, AppResult},
    models::{Image, Library, NewLibrary},
};

#[derive(Default)]
struct State {
    libraries: Vec<Library>,
    next_library_id: i32,
    next_image_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Library>> {
        Ok(self.state.lock().unwrap().libraries.clone())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Library> {
        self.state
            .lock()
            .unwrap()
            .libraries
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Library {} not found", id)))
    }

    async fn create(&self, data: &NewLibrary) -> AppResult<Library> {
        let mut state = self.state.lock().unwrap();
        state.next_library_id += 1;
        let id = state.next_library_id;

        let mut images = Vec::with_capacity(data.images.len());
        for image in &data.images {
            state.next_image_id += 1;
            images.push(Image {
                id: state.next_image_id,
                library_id: id,
                path: image.path.clone(),
            });
        }

        let library = Library {
            id,
            name: data.name.clone(),
            latitude: data.latitude,
            longitude: data.longitude,
            about: data.about.clone(),
            phone: data.phone.clone(),
            website: data.website.clone(),
            facebook: data.facebook.clone(),
            instagram: data.instagram.clone(),
            opening_hours: data.opening_hours.clone(),
            open_on_weekends: data.open_on_weekends,
            images,
        };
        state.libraries.push(library.clone());
        Ok(library)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
