use std::sync::Arc;

use moviedb_dal::{movie::MovieRepository, Pool};

use crate::service::DefaultMovieService;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(pool: Pool) -> Self {
        AppState {
            state: Arc::new(AppStateInner { pool }),
        }
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }

    pub fn movie_service(&self) -> DefaultMovieService {
        DefaultMovieService::new(MovieRepository::new(self.pool().clone()))
    }
}

struct AppStateInner {
    pool: Pool,
}
