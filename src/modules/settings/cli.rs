// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::imap::client::Encryption;
use clap::{builder::ValueParser, Parser};
use std::{path::PathBuf, sync::LazyLock};

#[cfg(not(test))]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::parse);

#[cfg(test)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new_for_test);

#[derive(Debug, Parser)]
#[clap(
    name = "rustarchiver",
    about = "Archives aging IMAP messages into per-year archive mailboxes, creating the target mailboxes on demand and moving messages in bounded batches.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Settings {
    /// rustarchiver log level (default: "info")
    #[clap(
        long,
        default_value = "info",
        env,
        help = "Set the log level for rustarchiver"
    )]
    pub rustarchiver_log_level: String,

    /// Enable ANSI logs (default: true)
    #[clap(long, default_value = "true", env, help = "Enable ANSI formatted logs")]
    pub rustarchiver_ansi_logs: bool,

    /// Log to rolling files instead of stdout (default: false)
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Enable log file output (otherwise logs go to stdout)"
    )]
    pub rustarchiver_log_to_file: bool,

    /// Directory for rolling log files (default: "./logs")
    #[clap(
        long,
        default_value = "./logs",
        env,
        help = "Set the directory used for rolling log files"
    )]
    pub rustarchiver_log_dir: PathBuf,

    /// Maximum number of rolling log files to keep (default: 7)
    #[clap(
        long,
        default_value = "7",
        env,
        help = "Set the maximum number of rolling log files to keep"
    )]
    pub rustarchiver_max_log_files: usize,

    /// IMAP server hostname
    #[clap(long, env, help = "Set the IMAP server hostname")]
    pub rustarchiver_imap_host: String,

    /// IMAP server port (default: 993)
    #[clap(long, default_value = "993", env, help = "Set the IMAP server port")]
    pub rustarchiver_imap_port: u16,

    /// Transport encryption: ssl, start-tls or none (default: ssl)
    #[clap(
        long,
        value_enum,
        default_value = "ssl",
        env,
        help = "Set the transport encryption used for the IMAP connection"
    )]
    pub rustarchiver_imap_encryption: Encryption,

    /// IMAP account username
    #[clap(long, env, help = "Set the IMAP account username")]
    pub rustarchiver_imap_username: String,

    /// IMAP account password (prefer the environment variable over the flag)
    #[clap(long, env, help = "Set the IMAP account password")]
    pub rustarchiver_imap_password: String,

    /// Source mailboxes to archive, comma-separated (default: "INBOX")
    #[clap(
        long,
        default_value = "INBOX",
        env,
        help = "Set the source mailboxes to archive (comma-separated list, e.g. \"INBOX, INBOX.Foo, Sent\")",
        value_delimiter = ',',
        value_parser = ValueParser::new(|s: &str| -> Result<String, String> {
            let mailbox = s.trim().to_string();
            if mailbox.is_empty() {
                return Err("mailbox names must not be empty".to_string());
            }
            Ok(mailbox)
        })
    )]
    pub rustarchiver_mailboxes: Vec<String>,

    /// Minimum age in days before a message is archived (default: 365)
    #[clap(
        long,
        default_value = "365",
        env,
        help = "Set the minimum age in days before a message is eligible for archiving"
    )]
    pub rustarchiver_max_age_days: u32,

    /// Upper bound on message identifiers per fetch/processing round (default: 50)
    #[clap(
        long,
        default_value = "50",
        env,
        help = "Set the maximum number of messages handled per batch",
        value_parser = ValueParser::new(|s: &str| -> Result<usize, String> {
            let size = s
                .parse::<usize>()
                .map_err(|e| format!("invalid batch size: {}", e))?;
            if size == 0 {
                return Err("the batch size must be greater than 0".to_string());
            }
            Ok(size)
        })
    )]
    pub rustarchiver_max_messages_per_batch: usize,

    /// Prefix for generated archive mailbox names (default: "Archives")
    #[clap(
        long,
        default_value = "Archives",
        env,
        help = "Set the mailbox prefix under which archive mailboxes are created"
    )]
    pub rustarchiver_archive_root: String,

    /// Hierarchy segment folded out of generated names (default: "INBOX")
    #[clap(
        long,
        default_value = "INBOX",
        env,
        help = "Set the mailbox segment removed from generated archive mailbox names"
    )]
    pub rustarchiver_inbox_segment: String,
}

impl Settings {
    #[cfg(test)]
    fn new_for_test() -> Self {
        Self {
            rustarchiver_log_level: "info".to_string(),
            rustarchiver_ansi_logs: false,
            rustarchiver_log_to_file: false,
            rustarchiver_log_dir: "./logs".into(),
            rustarchiver_max_log_files: 7,
            rustarchiver_imap_host: "localhost".to_string(),
            rustarchiver_imap_port: 993,
            rustarchiver_imap_encryption: Encryption::Ssl,
            rustarchiver_imap_username: "username".to_string(),
            rustarchiver_imap_password: "password".to_string(),
            rustarchiver_mailboxes: vec!["INBOX".to_string()],
            rustarchiver_max_age_days: 365,
            rustarchiver_max_messages_per_batch: 50,
            rustarchiver_archive_root: "Archives".to_string(),
            rustarchiver_inbox_segment: "INBOX".to_string(),
        }
    }
}
