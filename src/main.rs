use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rusty_golf_club::GolfRepository;
use rusty_golf_club::args;
use rusty_golf_club::controller::pages::not_found;
use rusty_golf_club::controller::story::{OpenAiStoryClient, StoryClient};
use rusty_golf_club::router;
use rusty_golf_club::storage::open_storage;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("APP_ENV").as_deref() != Ok("production") {
        dotenv::dotenv().ok();
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = match args::args_checks() {
        Ok(args) => args,
        Err(e) => {
            error!("invalid arguments: {e}");
            std::process::exit(1);
        }
    };

    let storage = match open_storage(&args).await {
        Ok(storage) => storage,
        Err(e) => {
            error!(error = %e, "could not open storage");
            std::process::exit(1);
        }
    };
    let repo = Data::new(GolfRepository::new(storage));
    let story: Arc<dyn StoryClient> = Arc::new(OpenAiStoryClient::new(
        args.openai_api_key.clone(),
        args.openai_model.clone(),
    ));
    let story = Data::from(story);

    info!(bind = %args.bind, "starting server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(story.clone())
            .configure(router::configure)
            .service(Files::new("/static", "./static"))
            .default_service(web::to(not_found))
    })
    .bind(&args.bind)?
    .run()
    .await?;
    Ok(())
}
