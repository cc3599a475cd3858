use moviedb_dal::{
    movie::{CreateMovie, Movie, MovieRepository},
    store::MovieStore,
};
use tracing::{debug, info};

use crate::validate::{validate, ValidationError};

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Movie {0} not found")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] moviedb_dal::Error),
}

/// Maps store errors for an operation on a known id, so that a record vanishing
/// between lookup and write still surfaces as not found.
fn not_found_for(id: i64) -> impl FnOnce(moviedb_dal::Error) -> ServiceError {
    move |e| match e {
        moviedb_dal::Error::RecordNotFound(_) => ServiceError::NotFound(id),
        other => ServiceError::Storage(other),
    }
}

pub type DefaultMovieService = MovieService<MovieRepository>;

#[derive(Clone)]
pub struct MovieService<S> {
    store: S,
}

impl<S: MovieStore> MovieService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Movie>> {
        let movies = self.store.list_all().await?;
        debug!("Listed {} movies", movies.len());
        Ok(movies)
    }

    /// Missing record is a regular outcome here, hence `None` rather than an error.
    pub async fn get(&self, id: i64) -> ServiceResult<Option<Movie>> {
        debug!("Getting movie {id}");
        let movie = self.store.find_by_id(id).await?;
        Ok(movie)
    }

    pub async fn create(&self, candidate: CreateMovie) -> ServiceResult<Movie> {
        validate(&candidate)?;
        let movie = self.store.insert(candidate).await?;
        info!("Created movie {} ({})", movie.id, movie.name);
        Ok(movie)
    }

    pub async fn update(&self, id: i64, candidate: CreateMovie) -> ServiceResult<()> {
        self.ensure_exists(id).await?;
        validate(&candidate)?;
        self.store
            .replace(id, candidate)
            .await
            .map_err(not_found_for(id))?;
        info!("Updated movie {id}");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.ensure_exists(id).await?;
        self.store.remove(id).await.map_err(not_found_for(id))?;
        info!("Deleted movie {id}");
        Ok(())
    }

    async fn ensure_exists(&self, id: i64) -> ServiceResult<()> {
        match self.store.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => {
                debug!("Movie {id} does not exist");
                Err(ServiceError::NotFound(id))
            }
        }
    }
}
