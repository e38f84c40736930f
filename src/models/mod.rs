// Data models for the applications backend

pub mod application;

pub use application::{Application, ApplicationState, Candidate, NewApplication, RecordId};
