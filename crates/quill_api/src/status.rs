//! Domain outcome to status code mapping table.
//!
//! | Outcome                                   | Status |
//! |-------------------------------------------|--------|
//! | list success                              | 200    |
//! | create/update/delete success              | 204    |
//! | missing credentials, unknown identity     | 401    |
//! | wrong secret, lack of permission          | 403    |
//! | article does not exist                    | 404    |
//! | malformed body, validation failure        | 400    |
//! | failed insert, storage or row-count fault | 500    |

use quill_core::{ActionResult, CreateOutcome, RepoError, WriteOutcome};

pub const OK: u16 = 200;
pub const NO_CONTENT: u16 = 204;
pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

pub fn action_status(result: ActionResult) -> u16 {
    match result {
        ActionResult::Ok => NO_CONTENT,
        ActionResult::LackOfPermission => FORBIDDEN,
        ActionResult::NotExist => NOT_FOUND,
    }
}

pub fn create_status(outcome: CreateOutcome) -> u16 {
    match outcome {
        CreateOutcome::Created(_) => NO_CONTENT,
        CreateOutcome::Unauthenticated => UNAUTHORIZED,
        CreateOutcome::WrongLogin => FORBIDDEN,
        CreateOutcome::Failed => INTERNAL_SERVER_ERROR,
    }
}

pub fn write_status(outcome: WriteOutcome) -> u16 {
    match outcome {
        WriteOutcome::Done(result) => action_status(result),
        WriteOutcome::Unauthenticated => UNAUTHORIZED,
        WriteOutcome::WrongLogin => FORBIDDEN,
    }
}

/// Validation errors are client mistakes; everything else is a fault.
pub fn fault_status(err: &RepoError) -> u16 {
    match err {
        RepoError::Validation(_) => BAD_REQUEST,
        RepoError::Db(_) | RepoError::UnexpectedRowCount { .. } | RepoError::InvalidData(_) => {
            INTERNAL_SERVER_ERROR
        }
    }
}
