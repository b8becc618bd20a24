use diesel::result::Error;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::Connection;
use rocket_db_pools::diesel::prelude::*;

use crate::db::VotesDB;
use crate::models::{
    DeleteAllResponse, ErrorResponse, NewVote, OkResponse, UpdateVoteRequest, UpdateVoteResponse,
    Vote, VoteValidationError,
};
use crate::routes::error_body;
use crate::schema::votes;

// Route to list every vote, newest first
#[get("/admin/votes")]
pub async fn get_all_votes(
    mut db: Connection<VotesDB>,
) -> Result<Json<Vec<Vote>>, status::Custom<Json<ErrorResponse>>> {
    let results = votes::table
        .order(votes::id.desc())
        .load::<Vote>(&mut db)
        .await
        .map_err(|e| {
            eprintln!("Error loading votes: {}", e);
            error_body(Status::InternalServerError, "Failed to fetch votes")
        })?;

    Ok(Json(results))
}

// Route to wipe the votes table ahead of a new party
#[delete("/admin/votes?<confirm>")]
pub async fn delete_all_votes(
    mut db: Connection<VotesDB>,
    confirm: Option<&str>,
) -> Result<Json<DeleteAllResponse>, status::Custom<Json<ErrorResponse>>> {
    if confirm != Some("true") {
        return Err(error_body(
            Status::BadRequest,
            "Must provide confirm=true parameter",
        ));
    }

    let deleted_count = diesel::delete(votes::table)
        .execute(&mut db)
        .await
        .map_err(|e| {
            eprintln!("Error deleting votes: {}", e);
            error_body(Status::InternalServerError, "Failed to delete votes")
        })?;

    Ok(Json(DeleteAllResponse {
        ok: true,
        deleted_count,
    }))
}

// Route to edit a vote in place
#[put("/admin/votes/<id>", format = "json", data = "<update_request>")]
pub async fn update_vote(
    mut db: Connection<VotesDB>,
    id: &str,
    update_request: Json<UpdateVoteRequest>,
) -> Result<Json<UpdateVoteResponse>, status::Custom<Json<ErrorResponse>>> {
    let vote_id: i32 = id
        .parse()
        .map_err(|_| error_body(Status::BadRequest, "Invalid vote ID"))?;

    let fields = NewVote::validated(
        update_request.voter_name.as_deref(),
        update_request.brought_candy.as_deref(),
        update_request.hate_vote.as_deref(),
        update_request.love_vote.as_deref(),
    )
    .map_err(|e| match e {
        VoteValidationError::MissingFields => error_body(
            Status::BadRequest,
            "Missing required fields: voter_name, brought_candy, hate_vote, love_vote",
        ),
        VoteValidationError::HateMatchesBrought => error_body(
            Status::BadRequest,
            "Hate vote cannot be the same as brought candy",
        ),
    })?;

    // Look the row up first so a stale id surfaces as 404, not a silent no-op
    votes::table
        .find(vote_id)
        .first::<Vote>(&mut db)
        .await
        .map_err(|e| match e {
            Error::NotFound => error_body(Status::NotFound, "Vote not found"),
            e => {
                eprintln!("Error loading vote {}: {}", vote_id, e);
                error_body(Status::InternalServerError, "Failed to update vote")
            }
        })?;

    diesel::update(votes::table.find(vote_id))
        .set(&fields)
        .execute(&mut db)
        .await
        .map_err(|e| {
            eprintln!("Error updating vote {}: {}", vote_id, e);
            error_body(Status::InternalServerError, "Failed to update vote")
        })?;

    // MySQL has no UPDATE .. RETURNING, so read the row back
    let updated = votes::table
        .find(vote_id)
        .first::<Vote>(&mut db)
        .await
        .map_err(|e| {
            eprintln!("Error reloading vote {}: {}", vote_id, e);
            error_body(Status::InternalServerError, "Failed to update vote")
        })?;

    Ok(Json(UpdateVoteResponse {
        ok: true,
        vote: updated,
    }))
}

// Route to remove a single vote
#[delete("/admin/votes/<id>")]
pub async fn delete_vote(
    mut db: Connection<VotesDB>,
    id: &str,
) -> Result<Json<OkResponse>, status::Custom<Json<ErrorResponse>>> {
    let vote_id: i32 = id
        .parse()
        .map_err(|_| error_body(Status::BadRequest, "Invalid vote ID"))?;

    let deleted = diesel::delete(votes::table.find(vote_id))
        .execute(&mut db)
        .await
        .map_err(|e| {
            eprintln!("Error deleting vote {}: {}", vote_id, e);
            error_body(Status::InternalServerError, "Failed to delete vote")
        })?;

    if deleted == 0 {
        return Err(error_body(Status::NotFound, "Vote not found"));
    }

    Ok(Json(OkResponse { ok: true }))
}
