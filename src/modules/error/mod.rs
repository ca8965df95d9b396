// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use code::ErrorCode;
use snafu::{Location, Snafu};

pub mod code;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RustArchiverError {
    #[snafu(display("{message}"))]
    Generic {
        message: String,
        #[snafu(implicit)]
        location: Location,
        code: ErrorCode,
    },
}

pub type RustArchiverResult<T, E = RustArchiverError> = std::result::Result<T, E>;

impl RustArchiverError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RustArchiverError::Generic { code, .. } => *code,
        }
    }
}
