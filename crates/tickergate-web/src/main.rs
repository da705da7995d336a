use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use tickergate_client::prelude::build_client;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod api;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    std::env::set_var(
        "RUST_LOG",
        "actix_web=info,tickergate_web=debug,tickergate_client=debug",
    );
    dotenv().ok();
    env_logger::init();

    // one upstream client, shared across workers
    let client = build_client().expect("failed to build the upstream HTTP client");

    // create API documentation
    use api::*;
    #[derive(OpenApi)]
    #[openapi(paths(market::data))]
    struct ApiDoc;
    let openapi = ApiDoc::openapi();

    // run server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(client.clone()))
            // api endpoints
            .service(market::data)
            // api documentation
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/openapi.json", openapi.clone()))
            // dashboard
            .service(
                Files::new("/", concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
                    .index_file("index.html"),
            )
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
