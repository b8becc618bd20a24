use rocket::Request;
use rocket::State;
use rocket::http::{Header, Status};
use rocket::request::{FromRequest, Outcome};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::Connection;
use rocket_db_pools::diesel::prelude::*;

use crate::AppState;
use crate::db::VotesDB;
use crate::models::{
    ErrorResponse, IngestRequest, NewVote, OkResponse, StatsResponse, Vote, VoteValidationError,
};
use crate::routes::error_body;
use crate::schema::votes;
use crate::stats::compute_stats;

pub const INGEST_SECRET_HEADER: &str = "x-ingest-secret";

/// Request guard proving the caller presented the shared ingest secret
pub struct IngestSecret;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for IngestSecret {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let state = match request.rocket().state::<AppState>() {
            Some(state) => state,
            None => return Outcome::Error((Status::InternalServerError, ())),
        };

        match request.headers().get_one(INGEST_SECRET_HEADER) {
            Some(provided) if provided == state.ingest_secret => Outcome::Success(IngestSecret),
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

/// Stats payload marked uncacheable so dashboards always poll fresh data
#[derive(Responder)]
pub struct StatsResponder {
    inner: Json<StatsResponse>,
    cache_control: Header<'static>,
}

// Route to ingest a vote submitted from the party form
#[post("/ingest", format = "json", data = "<ingest_request>")]
pub async fn ingest_vote(
    _secret: IngestSecret,
    mut db: Connection<VotesDB>,
    ingest_request: Json<IngestRequest>,
) -> Result<Json<OkResponse>, status::Custom<Json<ErrorResponse>>> {
    let new_vote = NewVote::validated(
        ingest_request.name.as_deref(),
        ingest_request.brought_candy.as_deref(),
        ingest_request.hate_vote.as_deref(),
        ingest_request.love_vote.as_deref(),
    )
    .map_err(|e| match e {
        VoteValidationError::MissingFields => error_body(
            Status::BadRequest,
            "Missing required fields: name, brought_candy, hate_vote, love_vote",
        ),
        VoteValidationError::HateMatchesBrought => {
            error_body(Status::BadRequest, "Hate vote cannot be your own candy")
        }
    })?;

    diesel::insert_into(votes::table)
        .values(&new_vote)
        .execute(&mut db)
        .await
        .map_err(|e| {
            eprintln!("Error saving vote: {}", e);
            error_body(Status::InternalServerError, "Failed to save vote")
        })?;

    Ok(Json(OkResponse { ok: true }))
}

// Route to compute and serve the dashboard statistics
#[get("/stats")]
pub async fn get_stats(
    mut db: Connection<VotesDB>,
    state: &State<AppState>,
) -> Result<StatsResponder, status::Custom<Json<ErrorResponse>>> {
    // Insertion order keeps tie layout and perPerson ordering reproducible
    let all_votes = votes::table
        .order(votes::id.asc())
        .load::<Vote>(&mut db)
        .await
        .map_err(|e| {
            eprintln!("Error loading votes: {}", e);
            error_body(Status::InternalServerError, "Failed to fetch votes")
        })?;

    Ok(StatsResponder {
        inner: Json(compute_stats(&all_votes, &state.roster)),
        cache_control: Header::new("Cache-Control", "no-store"),
    })
}
