// Main application entry point

#[macro_use]
extern crate rocket;

mod candy;
mod config;
mod db;
mod models;
mod roster;
mod routes;
mod schema;
mod stats;

use rocket::fairing::AdHoc;
use rocket::fs::FileServer;
use rocket_db_pools::Database;

use config::AppConfig;
use db::VotesDB;
use roster::Roster;
use routes::roster as roster_routes;
use routes::votes;

/// Shared application state available to all request handlers
pub struct AppState {
    pub ingest_secret: String,
    pub roster: Roster,
}

#[rocket::launch]
fn rocket() -> _ {
    let app_config = AppConfig::load();
    let database_url = app_config.database_url.clone();

    let figment = rocket::config::Config::figment()
        .merge(("port", app_config.rocket_port))
        .merge((
            "databases.votes_db",
            rocket_db_pools::Config {
                url: app_config.database_url.clone(),
                min_connections: None,
                max_connections: 16,
                connect_timeout: 3,
                idle_timeout: None,
                extensions: None,
            },
        ));

    let state = AppState {
        ingest_secret: app_config.ingest_shared_secret.clone(),
        roster: Roster::load(&app_config.roster_path),
    };

    println!(
        "✅ Loaded {} voters from {}",
        state.roster.all_voters().len(),
        app_config.roster_path
    );

    rocket::custom(figment)
        .attach(VotesDB::init())
        .attach(AdHoc::on_ignite("Database Migrations", move |rocket| {
            db::run_migrations(rocket, database_url)
        }))
        .manage(state)
        .mount(
            "/",
            routes![
                votes::client::ingest_vote,
                votes::client::get_stats,
                votes::admin::get_all_votes,
                votes::admin::delete_all_votes,
                votes::admin::update_vote,
                votes::admin::delete_vote,
                roster_routes::admin::get_voter_status,
            ],
        )
        .mount("/", FileServer::from(app_config.static_dir.clone()))
        .register(
            "/",
            catchers![
                routes::bad_request,
                routes::unauthorized,
                routes::not_found,
                routes::unprocessable_entity,
                routes::internal_server_error,
            ],
        )
}
