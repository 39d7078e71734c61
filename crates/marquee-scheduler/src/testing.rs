//! In-memory catalog and gateway fakes for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use marquee_catalog::{
    Catalog, CatalogError, Image, Movie, MovieImages, MovieRef, MovieSummary, PosterUrls,
    Schedule, Session, Theater, Trailer,
};
use marquee_push::{Notification, PushError, PushGateway};

pub fn theater(id: i64, name: &str) -> Theater {
    Theater {
        id,
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn movie(id: i64, title: &str, release_date: Option<NaiveDate>) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        release_date,
        poster_urls: PosterUrls {
            large: Some(format!("https://img/{}/large.jpg", id)),
            ..Default::default()
        },
        trailer: None,
        images: None,
    }
}

pub fn with_trailer(mut movie: Movie, video_id: &str) -> Movie {
    movie.trailer = Some(Trailer {
        id: video_id.to_string(),
    });
    movie
}

pub fn images(backdrops: &[&str], posters: &[&str]) -> MovieImages {
    MovieImages {
        backdrops: backdrops.iter().map(|u| Image::new(*u)).collect(),
        posters: posters.iter().map(|u| Image::new(*u)).collect(),
    }
}

pub fn schedule(movie_ids: &[i64]) -> Schedule {
    Schedule {
        sessions: movie_ids
            .iter()
            .map(|&id| Session {
                movie: MovieRef { id },
                time: None,
            })
            .collect(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Tracks how many calls are in flight and the highest count seen.
#[derive(Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    theaters: Vec<Theater>,
    movies: Vec<Movie>,
    schedules: HashMap<String, Schedule>,
    fail_theaters: bool,
    fail_now_playing: bool,
    fail_details: HashSet<i64>,
    delay: Duration,
    schedule_delay: Duration,
    pub theater_calls: AtomicUsize,
    pub now_playing_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub schedule_calls: AtomicUsize,
    pub detail_flags: Mutex<Vec<(i64, bool, bool)>>,
    pub details_in_flight: InFlight,
    pub schedules_in_flight: InFlight,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theaters(mut self, theaters: Vec<Theater>) -> Self {
        self.theaters = theaters;
        self
    }

    pub fn with_movie(mut self, movie: Movie) -> Self {
        self.movies.push(movie);
        self
    }

    pub fn with_schedule(mut self, theater_id: &str, schedule: Schedule) -> Self {
        self.schedules.insert(theater_id.to_string(), schedule);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_schedule_delay(mut self, delay: Duration) -> Self {
        self.schedule_delay = delay;
        self
    }

    pub fn failing_theaters(mut self) -> Self {
        self.fail_theaters = true;
        self
    }

    pub fn failing_now_playing(mut self) -> Self {
        self.fail_now_playing = true;
        self
    }

    pub fn failing_detail(mut self, id: i64) -> Self {
        self.fail_details.insert(id);
        self
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_theaters(&self) -> Result<Vec<Theater>, CatalogError> {
        self.theater_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_theaters {
            return Err(CatalogError::NotFound("/theaters".to_string()));
        }
        Ok(self.theaters.clone())
    }

    async fn list_now_playing(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        self.now_playing_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_now_playing {
            return Err(CatalogError::NotFound("/movies/now-playing".to_string()));
        }
        Ok(self
            .movies
            .iter()
            .map(|m| MovieSummary {
                id: m.id,
                title: m.title.clone(),
            })
            .collect())
    }

    async fn get_movie_detail(
        &self,
        id: i64,
        include_trailer: bool,
        include_images: bool,
    ) -> Result<Movie, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.detail_flags
            .lock()
            .unwrap()
            .push((id, include_trailer, include_images));
        self.details_in_flight.enter();
        self.pause().await;
        self.details_in_flight.exit();
        if self.fail_details.contains(&id) {
            return Err(CatalogError::NotFound(format!("/movies/{}", id)));
        }
        self.movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("/movies/{}", id)))
    }

    async fn get_schedule(&self, theater_id: &str) -> Result<Schedule, CatalogError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        self.schedules_in_flight.enter();
        if !self.schedule_delay.is_zero() {
            tokio::time::sleep(self.schedule_delay).await;
        }
        self.schedules_in_flight.exit();
        self.schedules
            .get(theater_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("/theaters/{}/schedule", theater_id)))
    }
}

/// Records every notification it is asked to send.
#[derive(Default)]
pub struct RecordingGateway {
    pub sent: Mutex<Vec<Notification>>,
    reject: bool,
    fail: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send(&self, notification: &Notification) -> Result<bool, PushError> {
        if self.fail {
            return Err(PushError::AuthKeyNotDefined);
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(!self.reject)
    }
}
