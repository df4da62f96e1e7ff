use actix_form::FormData;
use actix_web::{middleware::Logger, post, App, HttpServer, Responder};

#[post("/")]
async fn greet(form: FormData) -> impl Responder {
    format!("{}\n", form.get_or("username", "anonymous"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    HttpServer::new(|| App::new().service(greet).wrap(Logger::default()))
        .bind(("127.0.0.1", 8080))?
        .run()
        .await
}
