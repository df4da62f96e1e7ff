use actix_form::Form;
use actix_web::{middleware::Logger, post, App, HttpServer, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct User {
    username: String,
    password: String,
}

#[post("/")]
async fn create(form: Form<User>) -> impl Responder {
    let user = form.into_inner();
    format!("created `{}` ({} byte password)\n", user.username, user.password.len())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    HttpServer::new(|| App::new().service(create).wrap(Logger::default()))
        .bind(("127.0.0.1", 8080))?
        .run()
        .await
}
