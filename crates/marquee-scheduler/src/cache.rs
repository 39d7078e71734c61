//! Shared theater and movie cache.
//!
//! Every job needs the theater list and now-playing movie detail, but the
//! catalog should be asked only once per run. The first job to call
//! [`AuxDataCache::ensure_populated`] performs the fetch; every concurrent
//! caller waits on the same cell and is released when the snapshot is
//! published. A failed fetch publishes an empty snapshot, which stays in
//! place for the rest of the run.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use marquee_catalog::{Catalog, Movie, Theater};

/// Immutable snapshot of theaters and now-playing movies.
#[derive(Debug, Default)]
pub struct AuxData {
    theaters: HashMap<i64, Theater>,
    movies: HashMap<i64, Movie>,
}

impl AuxData {
    pub fn theater(&self, id: i64) -> Option<&Theater> {
        self.theaters.get(&id)
    }

    pub fn movie(&self, id: i64) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn theater_count(&self) -> usize {
        self.theaters.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theaters.is_empty() && self.movies.is_empty()
    }
}

/// Lazily populated, run-scoped cache shared by all workers.
pub struct AuxDataCache {
    catalog: Arc<dyn Catalog>,
    data: OnceCell<AuxData>,
}

impl AuxDataCache {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            data: OnceCell::new(),
        }
    }

    /// Populate the cache if no caller has done so yet, then return the snapshot.
    ///
    /// Concurrent callers never trigger a second fetch; they wait until the
    /// in-flight one finishes.
    pub async fn ensure_populated(&self) -> &AuxData {
        self.data
            .get_or_init(|| collect(Arc::clone(&self.catalog)))
            .await
    }

    /// Whether a snapshot has been published.
    pub fn is_populated(&self) -> bool {
        self.data.initialized()
    }
}

async fn collect(catalog: Arc<dyn Catalog>) -> AuxData {
    info!("collecting aux data");
    let mut data = AuxData::default();

    let theaters = match catalog.list_theaters().await {
        Ok(theaters) => theaters,
        Err(e) => {
            warn!(error = %e, "failed to fetch theaters, cache stays empty");
            return data;
        }
    };
    data.theaters = theaters.into_iter().map(|t| (t.id, t)).collect();

    let playing = match catalog.list_now_playing().await {
        Ok(playing) => playing,
        Err(e) => {
            warn!(error = %e, "failed to fetch now playing movies");
            return data;
        }
    };

    let ids: HashSet<i64> = playing.iter().map(|m| m.id).collect();
    let mut tasks = JoinSet::new();
    for id in ids {
        let catalog = Arc::clone(&catalog);
        tasks.spawn(async move { (id, catalog.get_movie_detail(id, true, true).await) });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((id, Ok(movie))) => {
                data.movies.insert(id, movie);
            }
            Ok((id, Err(e))) => {
                warn!(movie_id = id, error = %e, "failed to fetch movie detail");
            }
            Err(e) => {
                warn!(error = %e, "movie detail task failed");
            }
        }
    }

    debug!(
        theaters = data.theater_count(),
        movies = data.movie_count(),
        "aux data collected"
    );
    data
}
