// Job postings: plain CRUD. Job mutations are not broadcast.

pub mod handlers;
pub mod requests;
