//! Run-scoped handles shared by every job.

use std::sync::Arc;

use marquee_catalog::Catalog;
use marquee_push::PushGateway;

use crate::{AuxDataCache, Today};

/// Everything a job needs to run, passed explicitly instead of via globals.
pub struct JobContext {
    pub catalog: Arc<dyn Catalog>,
    pub push: Arc<dyn PushGateway>,
    pub cache: AuxDataCache,
    pub today: Today,
}

impl JobContext {
    /// Create a context with a fresh, empty cache.
    pub fn new(catalog: Arc<dyn Catalog>, push: Arc<dyn PushGateway>, today: Today) -> Self {
        Self {
            cache: AuxDataCache::new(Arc::clone(&catalog)),
            catalog,
            push,
            today,
        }
    }
}
