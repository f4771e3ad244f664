use std::path::Path;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use catalog_admin::db::establish_connection_pool;
use catalog_admin::models::config::ServerConfig;
use catalog_admin::repository::DieselRepository;
use catalog_admin::routes;
use catalog_admin::storage::{FsBlobStore, IMAGE_BUCKET};

fn message_signing_key(config: &ServerConfig) -> Key {
    match &config.secret_key {
        Some(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
        Some(_) => {
            log::warn!("secret_key is shorter than 32 bytes, generating a random key");
            Key::generate()
        }
        None => Key::generate(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()
        .map_err(std::io::Error::other)?;
    let server_config: ServerConfig = settings.try_deserialize().map_err(std::io::Error::other)?;

    let pool =
        establish_connection_pool(&server_config.database_url).map_err(std::io::Error::other)?;
    let repo = DieselRepository::new(pool);

    let media_dir = server_config.media_dir.clone();
    let store = FsBlobStore::new(Path::new(&media_dir).join(IMAGE_BUCKET));

    let tera = Tera::new("templates/**/*.html").map_err(std::io::Error::other)?;

    let message_store = CookieMessageStore::builder(message_signing_key(&server_config)).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    log::info!(
        "Starting catalog admin on {}:{}",
        server_config.bind_address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(message_framework.clone())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(tera.clone()))
            .service(routes::main::index)
            .service(routes::categories::show_categories)
            .service(routes::categories::add_category)
            .service(routes::categories::update_category)
            .service(routes::categories::delete_category)
            .service(routes::products::show_products)
            .service(routes::products::add_product)
            .service(routes::products::update_product)
            .service(routes::products::delete_product)
            .service(web::scope("/api").service(routes::api::api_v1_products))
            .service(Files::new("/media", media_dir.clone()))
    })
    .bind((server_config.bind_address.as_str(), server_config.port))?
    .run()
    .await
}
