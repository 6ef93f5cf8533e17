//! A serverless function that moves a captured lead through its lifecycle.
//!
//! The function answers `PATCH /api/leads/{id}` with a body such as
//! `{"status":"contacted"}` and updates the matching row of the `leads`
//! table in a single conditional statement.
pub mod config;
pub mod error;
mod function;
pub mod handler;
pub mod status;
pub mod store;
pub mod telemetry;

pub use crate::{
    function::LeadStatusFunction,
    status::{LeadId, LeadStatus},
    store::{LeadStore, SqliteLeadStore},
};
