use chrono::Utc;
use mock_server::{shared, Archive, Backend, Directory, RootDirectory, DEFAULT_REPOSITORY};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::init();
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    let now = Utc::now().naive_utc();
    let home = RootDirectory::new("/home", 1);
    let srv = RootDirectory::new("/srv", 2);
    let db = shared(Backend {
        directories: vec![
            Directory::new(&home, "/home/alice", now),
            Directory::new(&srv, "/srv/media/photos", now),
        ],
        archives: vec![(
            DEFAULT_REPOSITORY.to_string(),
            Archive {
                id: "0".repeat(64),
                name: "media-photos-20210304-050607".to_string(),
                start: now,
            },
        )],
        root_directories: vec![home, srv],
        jobs: Vec::new(),
    });

    log::info!("listening on {addr}");
    mock_server::run_with(listener, db).await
}
