use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Json,
};
use http::{header, StatusCode};
#[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
use moviedb_dal::movie::{CreateMovie, Movie};

use crate::{
    error::{ApiError, ApiResult},
    from_app_state,
    service::DefaultMovieService,
    state::AppState,
};

from_app_state!(DefaultMovieService, AppState::movie_service);

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/movies", tag = "Movie", operation_id = "listMovies",
    responses((status = StatusCode::OK, description = "All movies in creation order", body = Vec<Movie>))))]
pub async fn list(service: DefaultMovieService) -> ApiResult<impl IntoResponse> {
    let movies = service.list().await?;
    Ok((StatusCode::OK, Json(movies)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/movies/{id}", tag = "Movie", operation_id = "getMovie",
    params(("id" = i64, Path, description = "Movie id")),
    responses((status = StatusCode::OK, description = "Get one", body = Movie),
        (status = StatusCode::NOT_FOUND, description = "No such movie"))))]
pub async fn get_one(
    Path(id): Path<i64>,
    service: DefaultMovieService,
) -> ApiResult<impl IntoResponse> {
    let movie = service
        .get(id)
        .await?
        .ok_or_else(|| ApiError::ResourceNotFound(format!("Movie {id}")))?;
    Ok((StatusCode::OK, Json(movie)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "/movie", tag = "Movie", operation_id = "createMovie",
    request_body = CreateMovie,
    responses((status = StatusCode::CREATED, description = "Created Movie", body = Movie),
        (status = StatusCode::BAD_REQUEST, description = "Validation failed", body = crate::error::ErrorBody))))]
pub async fn create(
    service: DefaultMovieService,
    Json(payload): Json<CreateMovie>,
) -> ApiResult<impl IntoResponse> {
    let record = service.create(payload).await?;
    let location = format!("/movie/{}", record.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(put, path = "/movie/{id}", tag = "Movie", operation_id = "updateMovie",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = CreateMovie,
    responses((status = StatusCode::NO_CONTENT, description = "Updated"),
        (status = StatusCode::BAD_REQUEST, description = "Validation failed", body = crate::error::ErrorBody),
        (status = StatusCode::NOT_FOUND, description = "No such movie"))))]
pub async fn update(
    Path(id): Path<i64>,
    service: DefaultMovieService,
    Json(payload): Json<CreateMovie>,
) -> ApiResult<impl IntoResponse> {
    service.update(id, payload).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/movie/{id}", tag = "Movie", operation_id = "deleteMovie",
    params(("id" = i64, Path, description = "Movie id")),
    responses((status = StatusCode::OK, description = "Deleted"),
        (status = StatusCode::NOT_FOUND, description = "No such movie"))))]
pub async fn delete(
    Path(id): Path<i64>,
    service: DefaultMovieService,
) -> ApiResult<impl IntoResponse> {
    service.delete(id).await?;

    Ok(StatusCode::OK)
}

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(paths(list, get_one, create, update, delete))]
struct ApiDocs;

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;
    ApiDocs::openapi()
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/movies", get(list))
        .route("/movies/{id}", get(get_one))
        .route("/movie", post(create))
        .route("/movie/{id}", put(update).delete(delete))
}
