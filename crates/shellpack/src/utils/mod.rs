use camino::Utf8PathBuf;
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the directory where the current executable resides.
///
/// The prebuilt shell archive and the signing keystore are distributed next
/// to the binary and resolved through this.
pub fn install_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    let parent = exe.parent()?;
    Utf8PathBuf::from_path_buf(parent.to_path_buf()).ok()
}

/// Returns current UNIX epoch milliseconds.
pub fn now_epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
