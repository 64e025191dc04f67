// Candidate records: CRUD, resume upload, evaluation and contact.
// Every mutation is published to the dashboard room.

pub mod handlers;
pub mod requests;
