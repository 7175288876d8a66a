//! In-memory stand-in for the permafrust web server.
//!
//! Serves the same `/api` routes as the real backend. Listings come from
//! seeded rows. Long-running work (repository init, archive
//! create/replace/delete) is only recorded as an accepted `Job` so tests can
//! inspect what arrived.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootDirectory {
    pub id: Uuid,
    pub path: String,
    pub depth: i16,
}

impl RootDirectory {
    pub fn new(path: &str, depth: i16) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.to_string(),
            depth,
        }
    }
}

/// Repository used when a request names none.
pub const DEFAULT_REPOSITORY: &str = "/var/backups/permafrust";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub id: Uuid,
    pub path: String,
    pub modified_date: NaiveDateTime,
    pub root_directory_id: Uuid,
}

impl Directory {
    pub fn new(root: &RootDirectory, path: &str, modified_date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.to_string(),
            modified_date,
            root_directory_id: root.id,
        }
    }
}

/// One archive in a repository listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub id: String,
    pub name: String,
    pub start: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encryption {
    pub mode: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub location: String,
}

/// Response of `GET /api/archives`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveListing {
    pub archives: Vec<Archive>,
    pub encryption: Encryption,
    pub repository: Repository,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListArchives {
    #[serde(default)]
    pub repo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitRepository {
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub encryption: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateArchive {
    #[serde(default)]
    pub repo: Option<String>,
    pub directory_id: Uuid,
    #[serde(default)]
    pub compression: Option<String>,
    pub dry_run: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceArchive {
    #[serde(default)]
    pub repo: Option<String>,
    pub archive_id: Uuid,
    #[serde(default)]
    pub compression: Option<String>,
    pub dry_run: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteArchive {
    #[serde(default)]
    pub repo: Option<String>,
    pub archive_id: Uuid,
    pub dry_run: bool,
}

/// Work the server accepted with `202 Accepted`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Job {
    InitRepository(InitRepository),
    CreateArchive(CreateArchive),
    ReplaceArchive(ReplaceArchive),
    DeleteArchive(DeleteArchive),
}

#[derive(Debug, Default)]
pub struct Backend {
    pub root_directories: Vec<RootDirectory>,
    pub directories: Vec<Directory>,
    /// Archives keyed by repository location.
    pub archives: Vec<(String, Archive)>,
    pub jobs: Vec<Job>,
}

pub type Db = Arc<RwLock<Backend>>;

pub fn app() -> Router {
    app_with_root_directories(Vec::new())
}

pub fn app_with_root_directories(root_directories: Vec<RootDirectory>) -> Router {
    router(seeded(root_directories))
}

/// Shared state pre-filled with `root_directories` and nothing else.
pub fn seeded(root_directories: Vec<RootDirectory>) -> Db {
    shared(Backend {
        root_directories,
        ..Backend::default()
    })
}

pub fn shared(backend: Backend) -> Db {
    Arc::new(RwLock::new(backend))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/api/repository/init", post(init_repository))
        .route("/api/root-directories", get(list_root_directories))
        .route("/api/directories", get(list_directories))
        .route(
            "/api/archives",
            get(list_archives)
                .post(create_archive)
                .put(replace_archive)
                .delete(delete_archive),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, router(db)).await
}

async fn list_root_directories(State(db): State<Db>) -> Json<Vec<RootDirectory>> {
    Json(db.read().await.root_directories.clone())
}

async fn list_directories(State(db): State<Db>) -> Json<Vec<Directory>> {
    let mut directories = db.read().await.directories.clone();
    directories.sort_by(|a, b| a.path.cmp(&b.path));
    Json(directories)
}

async fn list_archives(
    State(db): State<Db>,
    Json(input): Json<ListArchives>,
) -> Json<ArchiveListing> {
    let location = input.repo.unwrap_or_else(|| DEFAULT_REPOSITORY.to_string());
    let backend = db.read().await;
    let archives = backend
        .archives
        .iter()
        .filter(|(repo, _)| *repo == location)
        .map(|(_, archive)| archive.clone())
        .collect();
    let mode = backend
        .jobs
        .iter()
        .rev()
        .find_map(|job| match job {
            Job::InitRepository(init)
                if init.repo.as_deref().unwrap_or(DEFAULT_REPOSITORY) == location =>
            {
                init.encryption.clone()
            }
            _ => None,
        })
        .unwrap_or_else(|| "none".to_string());
    Json(ArchiveListing {
        archives,
        encryption: Encryption { mode },
        repository: Repository { location },
    })
}

async fn init_repository(State(db): State<Db>, Json(input): Json<InitRepository>) -> StatusCode {
    accept(&db, Job::InitRepository(input)).await
}

async fn create_archive(State(db): State<Db>, Json(input): Json<CreateArchive>) -> StatusCode {
    accept(&db, Job::CreateArchive(input)).await
}

async fn replace_archive(State(db): State<Db>, Json(input): Json<ReplaceArchive>) -> StatusCode {
    accept(&db, Job::ReplaceArchive(input)).await
}

async fn delete_archive(State(db): State<Db>, Json(input): Json<DeleteArchive>) -> StatusCode {
    accept(&db, Job::DeleteArchive(input)).await
}

async fn accept(db: &Db, job: Job) -> StatusCode {
    log::info!("accepted {job:?}");
    db.write().await.jobs.push(job);
    StatusCode::ACCEPTED
}
