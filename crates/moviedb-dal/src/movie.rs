use crate::{Error, error::Result, store::MovieStore};
use futures::TryStreamExt as _;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use time::PrimitiveDateTime;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateMovie {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: String,
    /// When absent, falls back to the first day of year 1 so that the release date rule rejects it.
    #[serde(default = "release_date::unset", with = "release_date")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2022-01-01T00:00:00"))]
    pub release_date: PrimitiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub genre: String,
    #[serde(with = "release_date")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2022-01-01T00:00:00"))]
    pub release_date: PrimitiveDateTime,
}

impl From<Movie> for CreateMovie {
    fn from(value: Movie) -> Self {
        Self {
            name: value.name,
            description: value.description,
            genre: value.genre,
            release_date: value.release_date,
        }
    }
}

/// ISO-8601 date-time representation of `releaseDate`.
///
/// Always written as `YYYY-MM-DDThh:mm:ss`. Reading is more lenient and also takes
/// fractional seconds, a trailing `Z`, a plain `YYYY-MM-DD` date (meaning midnight)
/// and any ISO-8601 date-time with a UTC offset, which is normalized to UTC.
pub mod release_date {
    use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::{
        Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
        format_description::{BorrowedFormatItem, well_known::Iso8601},
        macros::{datetime, format_description},
    };

    const DATE_TIME: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    const DATE_TIME_FRACTION: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn format(value: &PrimitiveDateTime) -> Result<String, time::error::Format> {
        value.format(DATE_TIME)
    }

    pub fn parse(value: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
        let value = value.trim();
        let value = value.strip_suffix('Z').unwrap_or(value);
        PrimitiveDateTime::parse(value, DATE_TIME)
            .or_else(|_| PrimitiveDateTime::parse(value, DATE_TIME_FRACTION))
            .or_else(|_| Date::parse(value, DATE).map(|d| d.midnight()))
            .or_else(|_| {
                OffsetDateTime::parse(value, &Iso8601::DEFAULT).map(|dt| {
                    // out of range only at the year 9999 edge, keep the wall time there
                    let utc = dt.checked_to_offset(UtcOffset::UTC).unwrap_or(dt);
                    PrimitiveDateTime::new(utc.date(), utc.time())
                })
            })
    }

    pub fn unset() -> PrimitiveDateTime {
        datetime!(0001-01-01 0:00)
    }

    pub fn serialize<S>(value: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = format(value).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(D::Error::custom)
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, description, genre, release_date FROM movie";

pub type MovieRepository = MovieRepositoryImpl<Pool<crate::ChosenDB>>;

#[derive(Clone)]
pub struct MovieRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> MovieRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateMovie) -> Result<Movie> {
        let result = sqlx::query(
            "INSERT INTO movie (name, description, genre, release_date) VALUES (?, ?, ?, ?)",
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.genre)
        .bind(payload.release_date)
        .execute(&self.executor)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted movie with id {id}");
        self.get(id).await
    }

    pub async fn update(&self, id: i64, payload: CreateMovie) -> Result<()> {
        let result = sqlx::query(
            "UPDATE movie SET name = ?, description = ?, genre = ?, release_date = ? WHERE id = ?",
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.genre)
        .bind(payload.release_date)
        .bind(id)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Movie {id}")))
        } else {
            Ok(())
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let records = sqlx::query_as::<_, Movie>(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM movie")
            .fetch_one(&self.executor)
            .await?;
        Ok(count.max(0) as u64)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM movie WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Movie {id}")))
        } else {
            Ok(())
        }
    }

    pub async fn find(&self, id: i64) -> Result<Option<Movie>> {
        let record = sqlx::query_as::<_, Movie>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.executor)
            .await?;
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<Movie> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::RecordNotFound(format!("Movie {id}")))
    }
}

impl MovieStore for MovieRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>> {
        self.find(id).await
    }

    async fn list_all(&self) -> Result<Vec<Movie>> {
        MovieRepositoryImpl::list_all(self).await
    }

    async fn insert(&self, movie: CreateMovie) -> Result<Movie> {
        self.create(movie).await
    }

    async fn replace(&self, id: i64, movie: CreateMovie) -> Result<()> {
        self.update(id, movie).await
    }

    async fn remove(&self, id: i64) -> Result<()> {
        self.delete(id).await
    }

    async fn count(&self) -> Result<u64> {
        MovieRepositoryImpl::count(self).await
    }
}
