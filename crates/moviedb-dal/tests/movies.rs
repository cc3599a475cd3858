use futures::TryStreamExt as _;
use moviedb_dal::{
    Error,
    movie::{CreateMovie, MovieRepositoryImpl},
    store::MovieStore as _,
};
use sqlx::Executor;
use time::macros::datetime;

const TEST_DATA: &str = r#"
INSERT INTO movie (id, name, description, genre, release_date)
VALUES (1, 'Alien', 'In space no one can hear you scream', 'Sci-Fi', '1979-05-25 00:00:00');
INSERT INTO movie (id, name, description, genre, release_date)
VALUES (2, 'Heat', '', 'Crime', '1995-12-15 00:00:00');
"#;

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    moviedb_dal::migrate(&conn).await.unwrap();

    conn.execute_many(TEST_DATA)
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    conn
}

fn new_movie(name: &str) -> CreateMovie {
    CreateMovie {
        name: name.to_string(),
        description: format!("Description of {name}"),
        genre: "Drama".to_string(),
        release_date: datetime!(2023-01-01 0:00),
    }
}

#[tokio::test]
async fn test_movie_get() {
    let conn = init_db().await;
    let repo = MovieRepositoryImpl::new(conn);

    let movie = repo.get(1).await.unwrap();
    assert_eq!(movie.name, "Alien");
    assert_eq!(movie.genre, "Sci-Fi");
    assert_eq!(movie.release_date, datetime!(1979-05-25 0:00));

    let missing = repo.find(42).await.unwrap();
    assert!(missing.is_none());
    let err = repo.get(42).await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound(_)));
}

#[tokio::test]
async fn test_movie_create_assigns_new_ids() {
    let conn = init_db().await;
    let repo = MovieRepositoryImpl::new(conn);

    let created = repo.create(new_movie("Arrival")).await.unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.name, "Arrival");
    assert_eq!(created.description, "Description of Arrival");
    assert_eq!(created.release_date, datetime!(2023-01-01 0:00));

    let all = repo.list_all().await.unwrap();
    let names = all.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Alien", "Heat", "Arrival"]);
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_movie_ids_not_reused_after_delete() {
    let conn = init_db().await;
    let repo = MovieRepositoryImpl::new(conn);

    let created = repo.create(new_movie("Arrival")).await.unwrap();
    repo.delete(created.id).await.unwrap();
    let next = repo.create(new_movie("Dune")).await.unwrap();
    assert!(next.id > created.id);
}

#[tokio::test]
async fn test_movie_update() {
    let conn = init_db().await;
    let repo = MovieRepositoryImpl::new(conn);

    repo.update(2, new_movie("Heat 2")).await.unwrap();
    let movie = repo.get(2).await.unwrap();
    assert_eq!(movie.name, "Heat 2");
    assert_eq!(movie.description, "Description of Heat 2");
    assert_eq!(movie.genre, "Drama");
    assert_eq!(movie.release_date, datetime!(2023-01-01 0:00));

    let err = repo.update(42, new_movie("Nothing")).await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound(_)));
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_movie_delete() {
    let conn = init_db().await;
    let repo = MovieRepositoryImpl::new(conn);

    repo.delete(1).await.unwrap();
    assert!(repo.find(1).await.unwrap().is_none());

    let err = repo.delete(1).await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound(_)));
}

#[tokio::test]
async fn test_movie_store_trait() {
    let conn = init_db().await;
    let store = MovieRepositoryImpl::new(conn);

    let inserted = store.insert(new_movie("Up")).await.unwrap();
    let found = store.find_by_id(inserted.id).await.unwrap();
    assert_eq!(found, Some(inserted.clone()));

    store.replace(inserted.id, new_movie("Down")).await.unwrap();
    let found = store.find_by_id(inserted.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Down");

    store.remove(inserted.id).await.unwrap();
    assert_eq!(store.find_by_id(inserted.id).await.unwrap(), None);
    assert_eq!(store.count().await.unwrap(), 2);
}
