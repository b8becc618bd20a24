use std::cmp::Ordering;

use rocket::State;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::Connection;
use rocket_db_pools::diesel::prelude::*;

use crate::AppState;
use crate::db::VotesDB;
use crate::models::{ErrorResponse, Vote, VoterStatus};
use crate::roster::names_match;
use crate::routes::error_body;
use crate::schema::votes;

// Route to report which roster members have voted
#[get("/admin/voters")]
pub async fn get_voter_status(
    mut db: Connection<VotesDB>,
    state: &State<AppState>,
) -> Result<Json<Vec<VoterStatus>>, status::Custom<Json<ErrorResponse>>> {
    // Newest first so each voter reports their latest submission
    let all_votes = votes::table
        .order(votes::id.desc())
        .load::<Vote>(&mut db)
        .await
        .map_err(|e| {
            eprintln!("Error loading votes: {}", e);
            error_body(Status::InternalServerError, "Failed to fetch votes")
        })?;

    let mut voters: Vec<VoterStatus> = state
        .roster
        .all_voters()
        .iter()
        .map(|entry| {
            let vote = all_votes
                .iter()
                .find(|v| names_match(&v.voter_name, &entry.name))
                .cloned();

            VoterStatus {
                name: entry.name.clone(),
                avatar_url: entry.avatar_url.clone(),
                has_voted: vote.is_some(),
                vote,
            }
        })
        .collect();

    // Non-voters first, then alphabetical
    voters.sort_by(|a, b| match (a.has_voted, b.has_voted) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    Ok(Json(voters))
}
