use anyhow::{Result, anyhow};
use moviedb_dal::movie::Movie;
use reqwest::Url;
use serde_json::json;
use tracing::info;

pub fn movie_payload(name: &str, description: &str, genre: &str, release_date: &str) -> serde_json::Value {
    json!({"name": name, "description": description, "genre": genre, "releaseDate": release_date})
}

pub async fn create_movie(
    client: &reqwest::Client,
    base_url: &Url,
    payload: &serde_json::Value,
) -> Result<Movie> {
    let api_url = base_url.join("movie")?;

    let response = client.post(api_url).json(payload).send().await?;
    info!("Response: {:#?}", response);
    if response.status().as_u16() != 201 {
        return Err(anyhow!("Unexpected status {}", response.status()));
    }

    let new_movie: Movie = response.json().await?;
    Ok(new_movie)
}

pub async fn list_movies(client: &reqwest::Client, base_url: &Url) -> Result<Vec<Movie>> {
    let response = client.get(base_url.join("movies")?).send().await?;
    let response = response.error_for_status()?;
    let movies: Vec<Movie> = response.json().await?;
    Ok(movies)
}
