// Vote routes - ingest and stats for the party, plus the admin CRUD surface

pub mod admin;
pub mod client;
