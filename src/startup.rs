use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer,
};
use mongodb::{options::ClientOptions, Client};
use secrecy::ExposeSecret;
use std::net::TcpListener;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::{DatabaseSettings, Settings},
    repositories::book_mongo_repository::BookMongoRepository,
    routes::{
        create_book::create_book, delete_book::delete_book, health_check::health_check,
        initialize_bookstore::initialize_bookstore, list_books::list_books,
        update_book::update_book,
    },
};

/// Holds the newly built server, and some useful properties
pub struct Application {
    server: Server,
    port: u16,

    // Used for integration tests
    mongo_client: Client,
}

#[derive(thiserror::Error, Debug)]
pub enum ApplicationBuildError {
    #[error(transparent)]
    MongoDBError(#[from] mongodb::error::Error),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl Application {
    /// # Parameters
    /// - nb_workers: number of actix-web workers
    ///   if `None`, the number of available physical CPUs is used as the worker count.
    #[tracing::instrument(name = "Building application", skip(settings))]
    pub async fn build(
        settings: Settings,
        nb_workers: Option<usize>,
    ) -> Result<Self, ApplicationBuildError> {
        let mongo_client = get_mongo_client(&settings.database).await?;

        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let book_repository = BookMongoRepository::new(&mongo_client, &settings.database);

        let server = run(listener, settings, nb_workers, book_repository)?;

        Ok(Self {
            server,
            port,
            mongo_client,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn mongo_client(&self) -> Client {
        self.mongo_client.clone()
    }

    /// This function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        info!("Running server ...");
        self.server.await
    }
}

/// listener: the consumer binds their own port
///
/// TracingLogger middleware: helps collecting telemetry data.
/// It generates a unique identifier for each incoming request: `request_id`.
///
/// # Parameters
/// - nb_workers: number of actix-web workers
///   if `None`, the number of available physical CPUs is used as the worker count.
pub fn run(
    listener: TcpListener,
    settings: Settings,
    nb_workers: Option<usize>,
    book_repository: BookMongoRepository,
) -> Result<Server, std::io::Error> {
    // Wraps the settings and the repository in a `actix_web::Data` (`Arc`) to be
    // able to register them and access them from handlers.
    // They are shared among all threads.
    let settings = Data::new(settings);
    let book_repository = Data::new(book_repository);

    // `move` to capture variables from the surrounding environment
    let server = HttpServer::new(move || {
        info!("Starting actix-web worker");

        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/", web::get().to(initialize_bookstore))
            .route("/books", web::get().to(list_books))
            .route("/books", web::post().to(create_book))
            .route("/books/{isbn}", web::put().to(update_book))
            .route("/books/{isbn}", web::delete().to(delete_book))
            .app_data(settings.clone())
            .app_data(book_repository.clone())
    })
    .listen(listener)?;

    // If no workers were set, use the actix-web settings (number of workers = number of physical CPUs)
    if let Some(nb_workers) = nb_workers {
        return Ok(server.workers(nb_workers).run());
    }

    // No await
    Ok(server.run())
}

/// Builds a client to the MongoDB instance.
///
/// The client connects lazily: a wrong host or bad credentials are only
/// discovered by the first operation using it, and surface as a repository
/// error on that request.
#[tracing::instrument(name = "Create MongoDB client", skip(settings))]
pub async fn get_mongo_client(settings: &DatabaseSettings) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(settings.connection_string().expose_secret()).await?;
    // Fails fast when the store cannot be reached, instead of the driver's
    // 30 second default.
    options.server_selection_timeout = Some(Duration::from_secs(2));

    Client::with_options(options)
}
