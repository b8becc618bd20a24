// Roster routes - who is on the list and whether they have voted yet

pub mod admin;
