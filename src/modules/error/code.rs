// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCode {
    // Client-side errors (10000–10999)
    InvalidParameter = 10000,

    // Network connection errors (40000–40999)
    NetworkError = 40000,
    ConnectionTimeout = 40010,

    // Mail service errors (50000–50999)
    ImapCommandFailed = 50000,
    ImapAuthenticationFailed = 50010,
    MailboxSelectionFailed = 50100,
    SearchFailed = 50110,
    FetchParseFailed = 50120,
    MailboxCreationFailed = 50130,
    ArchiveMoveFailed = 50140,

    // Internal system errors (70000–70999)
    InternalError = 70000,
}
