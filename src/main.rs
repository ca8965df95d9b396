use chrono::Utc;
use mimalloc::MiMalloc;
use modules::{
    archive::engine::{ArchiveEngine, ArchivePolicy},
    error::{code::ErrorCode, RustArchiverResult},
    imap::{client::Client, executor::ImapExecutor},
    logger,
    settings::cli::SETTINGS,
};
use tracing::{error, info, warn};

mod modules;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

static LOGO: &str = r#"
  ____            _      _             _     _
 |  _ \ _   _ ___| |_   / \   _ __ ___| |__ (_)_   _____ _ __
 | |_) | | | / __| __| / _ \ | '__/ __| '_ \| \ \ / / _ \ '__|
 |  _ <| |_| \__ \ |_ / ___ \| | | (__| | | | |\ V /  __/ |
 |_| \_\\__,_|___/\__/_/   \_\_|  \___|_| |_|_| \_/ \___|_|

"#;

#[tokio::main]
async fn main() -> RustArchiverResult<()> {
    logger::initialize_logging();
    info!("{}", LOGO);
    info!("Starting rustarchiver");
    info!("Version:  {}", rustarchiver_version!());
    info!("Git:      [{}]", env!("GIT_HASH"));

    rustls::crypto::CryptoProvider::install_default(rustls::crypto::ring::default_provider())
        .map_err(|_| {
            raise_error!(
                "failed to set crypto provider".into(),
                ErrorCode::InternalError
            )
        })?;

    run().await
}

async fn run() -> RustArchiverResult<()> {
    let client = Client::connection(
        SETTINGS.rustarchiver_imap_host.clone(),
        SETTINGS.rustarchiver_imap_encryption,
        SETTINGS.rustarchiver_imap_port,
    )
    .await?;
    let session = client
        .login(
            &SETTINGS.rustarchiver_imap_username,
            &SETTINGS.rustarchiver_imap_password,
        )
        .await?;
    let executor = ImapExecutor::new(session);

    let policy = ArchivePolicy {
        max_age_days: SETTINGS.rustarchiver_max_age_days,
        max_messages_per_batch: SETTINGS.rustarchiver_max_messages_per_batch,
        archive_root: SETTINGS.rustarchiver_archive_root.clone(),
        inbox_segment: SETTINGS.rustarchiver_inbox_segment.clone(),
    };

    // One clock snapshot for the whole run: every mailbox is archived
    // against the same age cutoff.
    let mut engine = ArchiveEngine::new(executor, policy, Utc::now()).await?;

    let mut failed = 0usize;
    for mailbox in &SETTINGS.rustarchiver_mailboxes {
        info!("archiving mailbox {:?}", mailbox);
        if let Err(error) = engine.archive_mailbox(mailbox).await {
            error!("failed to archive mailbox {:?}: {:?}", mailbox, error);
            failed += 1;
        }
    }

    let mut executor = engine.into_client();
    if let Err(error) = executor.logout().await {
        warn!("logout failed: {:?}", error);
    }

    if failed > 0 {
        return Err(raise_error!(
            format!(
                "{} of {} mailboxes failed to archive",
                failed,
                SETTINGS.rustarchiver_mailboxes.len()
            ),
            ErrorCode::InternalError
        ));
    }
    Ok(())
}
