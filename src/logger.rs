use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("spectra-table-debug.log")
}

/// Redirect the debug log. Only the first call wins; later calls are ignored.
pub fn init(path: Option<PathBuf>) {
    let _ = LOG_PATH.set(path.unwrap_or_else(default_log_path));
}

pub fn log_path() -> &'static PathBuf {
    LOG_PATH.get_or_init(default_log_path)
}

pub fn log(message: &str) {
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())
    {
        let _ = writeln!(file, "{}", message);
    }
}
