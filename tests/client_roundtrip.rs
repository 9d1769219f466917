//! End-to-end pass over a live server: the view-model side drives the same
//! HTTP contract the browser client depends on.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use reelshelf::{
    AppState, build_router,
    client::ApiClient,
    error::ApiError,
    models::{MoviePatch, MovieRecord},
    omdb::OmdbClient,
    store::JsonFileStore,
    viewmodel::MovieList,
};

async fn spawn_server(dir: &tempfile::TempDir) -> SocketAddr {
    let store = JsonFileStore::new(dir.path().join("movies.json"));
    let http = reqwest::Client::builder().timeout(Duration::from_secs(2)).build().unwrap();
    let omdb = OmdbClient::new(http, "test-key".to_string(), "http://127.0.0.1:1".to_string(), 4);
    let app = build_router(Arc::new(AppState { store: Arc::new(store), omdb: Arc::new(omdb) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn dune() -> MovieRecord {
    MovieRecord {
        title: "Dune".to_string(),
        year: "2021".to_string(),
        director: "Denis Villeneuve".to_string(),
        actors: vec!["Timothée Chalamet".to_string()],
        rating: 0.0,
        seen: false,
        genre: "Sci-Fi".to_string(),
        poster: "http://x/p.jpg".to_string(),
    }
}

#[tokio::test]
async fn optimistic_edit_confirmed_by_the_server() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(&dir).await;
    let api = ApiClient::new(reqwest::Client::new(), format!("http://{addr}"));

    api.add_movie(&dune()).await.unwrap();

    let mut list = MovieList::default();
    list.load(api.list_movies().await.unwrap());
    assert_eq!(list.movies(), &[dune()]);

    // Patch locally first, then reconcile with the server's answer.
    let patch = MoviePatch { rating: None, seen: Some(true) };
    let pending = list.begin_update("dune", &patch).unwrap();
    assert!(list.movies()[0].seen);

    match api.update_movie("dune", &patch).await {
        Ok(()) => list.confirm_update(pending),
        Err(_) => list.fail_update(pending),
    }
    assert!(list.movies()[0].seen);

    // The server agrees without a re-fetch having been needed.
    let fresh = api.list_movies().await.unwrap();
    assert!(fresh[0].seen);
    assert_eq!(fresh[0].rating, 0.0);
}

#[tokio::test]
async fn optimistic_edit_rolled_back_on_rejection() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(&dir).await;
    let api = ApiClient::new(reqwest::Client::new(), format!("http://{addr}"));

    api.add_movie(&dune()).await.unwrap();

    let mut list = MovieList::default();
    list.load(api.list_movies().await.unwrap());

    // Local cache drifted: it still holds a record the server never had.
    let mut stale = list.movies().to_vec();
    stale.push(MovieRecord { title: "Tenet".to_string(), ..dune() });
    list.load(stale);

    let patch = MoviePatch { rating: Some(9.0), seen: None };
    let pending = list.begin_update("Tenet", &patch).unwrap();
    assert_eq!(list.movies()[1].rating, 9.0);

    let err = api.update_movie("Tenet", &patch).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    list.fail_update(pending);
    assert_eq!(list.movies()[1].rating, 0.0);
}

#[tokio::test]
async fn duplicate_add_surfaces_as_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(&dir).await;
    let api = ApiClient::new(reqwest::Client::new(), format!("http://{addr}"));

    api.add_movie(&dune()).await.unwrap();

    let mut variant = dune();
    variant.title = "DUNE".to_string();
    let err = api.add_movie(&variant).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn draft_for_unknown_movie_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(&dir).await;
    let api = ApiClient::new(reqwest::Client::new(), format!("http://{addr}"));

    let err = api.fetch_draft("Some Movie: The Sequel").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
