pub mod engine;
pub mod importer;
pub mod report;
pub mod transform;
pub mod user_service;
pub mod workbook;

pub use crate::domain::model::{MemberPayload, Outcome, OutcomeRecord, RawRow, Sheet};
pub use crate::domain::ports::{CreateUserResponse, UserDirectory};
pub use crate::utils::error::Result;
