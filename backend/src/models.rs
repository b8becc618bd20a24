use chrono::NaiveDateTime;
use rocket::serde::{Deserialize, Serialize};
use rocket_db_pools::diesel::prelude::*;

use crate::schema::votes;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable)]
#[serde(crate = "rocket::serde")]
#[diesel(table_name = votes)]
pub struct Vote {
    pub id: i32,
    pub created_at: Option<NaiveDateTime>,
    pub voter_name: String,
    pub brought_candy: String,
    pub hate_vote: String,
    pub love_vote: String,
}

/// The four editable text fields of a vote, trimmed and validated. Used
/// both for inserts and for full-record admin updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = votes)]
pub struct NewVote {
    pub voter_name: String,
    pub brought_candy: String,
    pub hate_vote: String,
    pub love_vote: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteValidationError {
    /// A field was absent or blank after trimming.
    MissingFields,
    /// The hated candy is the submitter's own brought candy
    /// (case-insensitive comparison).
    HateMatchesBrought,
}

impl NewVote {
    /// Trim and validate the submitted fields. Absent fields and
    /// whitespace-only fields are both rejected as missing, matching the
    /// ingestion contract.
    pub fn validated(
        voter_name: Option<&str>,
        brought_candy: Option<&str>,
        hate_vote: Option<&str>,
        love_vote: Option<&str>,
    ) -> Result<Self, VoteValidationError> {
        let voter_name = voter_name.unwrap_or("").trim();
        let brought_candy = brought_candy.unwrap_or("").trim();
        let hate_vote = hate_vote.unwrap_or("").trim();
        let love_vote = love_vote.unwrap_or("").trim();

        if voter_name.is_empty()
            || brought_candy.is_empty()
            || hate_vote.is_empty()
            || love_vote.is_empty()
        {
            return Err(VoteValidationError::MissingFields);
        }

        if hate_vote.to_lowercase() == brought_candy.to_lowercase() {
            return Err(VoteValidationError::HateMatchesBrought);
        }

        Ok(Self {
            voter_name: voter_name.to_string(),
            brought_candy: brought_candy.to_string(),
            hate_vote: hate_vote.to_string(),
            love_vote: love_vote.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct IngestRequest {
    pub name: Option<String>,
    pub brought_candy: Option<String>,
    pub hate_vote: Option<String>,
    pub love_vote: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct UpdateVoteRequest {
    pub voter_name: Option<String>,
    pub brought_candy: Option<String>,
    pub hate_vote: Option<String>,
    pub love_vote: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct UpdateVoteResponse {
    pub ok: bool,
    pub vote: Vote,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DeleteAllResponse {
    pub ok: bool,
    pub deleted_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
}

/// One roster entry's voting status for the admin voter view. Field names
/// stay camelCase to match the view model the dashboard consumes.
#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct VoterStatus {
    pub name: String,
    pub avatar_url: String,
    pub has_voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<Vote>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CandyStats {
    pub candy: String,
    pub likes: i64,
    pub hates: i64,
    pub net: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PersonStats {
    pub name: String,
    pub avatar_url: String,
    pub hate_vote: String,
    pub love_vote: String,
    pub spicy_score: i64,
    pub pure_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SpicyTake {
    pub name: String,
    pub avatar_url: String,
    pub hate_vote: String,
    pub spicy_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PureHeart {
    pub name: String,
    pub avatar_url: String,
    pub love_vote: String,
    pub pure_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Awards {
    pub most_loved: Vec<CandyStats>,
    pub most_hated: Vec<CandyStats>,
    pub spiciest_take: Vec<SpicyTake>,
    pub purest_heart: Vec<PureHeart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StatsResponse {
    pub awards: Awards,
    #[serde(rename = "perCandy")]
    pub per_candy: Vec<CandyStats>,
    #[serde(rename = "perPerson")]
    pub per_person: Vec<PersonStats>,
}
