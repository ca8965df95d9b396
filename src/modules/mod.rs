// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod archive;
pub mod error;
pub mod imap;
pub mod logger;
pub mod settings;
pub mod utils;
