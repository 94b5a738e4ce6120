use crate::app_home::APP_HOME;
use crate::app_home::AppHome;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;
use tracing::warn;

/// A strongly-typed wrapper around the JPEG encoder quality (1-100)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JpegQuality(pub u8);

impl JpegQuality {
    /// Default JPEG quality
    pub const DEFAULT: u8 = 80;
    const FILE_NAME: &'static str = "jpeg_quality.txt";
    const ENV_VAR: &'static str = "IMAGE_OPTIMIZER_JPEG_QUALITY";

    /// Parse a quality value, rejecting anything outside 1-100
    #[must_use]
    pub fn parse(s: &str) -> Option<JpegQuality> {
        s.trim()
            .parse::<u8>()
            .ok()
            .filter(|v| (1..=100).contains(v))
            .map(JpegQuality)
    }

    /// Loads resolving rules:
    /// 1. If $`IMAGE_OPTIMIZER_JPEG_QUALITY` is set and valid -> use it (and DO NOT create file)
    /// 2. Otherwise, look for `${config_dir}/jpeg_quality.txt`
    ///    - if file exists, parse its trimmed contents
    ///    - otherwise, create the file containing the default and return default
    ///
    /// # Errors
    ///
    /// Returns an error if reading or creating the config file fails.
    pub fn load() -> eyre::Result<JpegQuality> {
        if let Ok(envv) = env::var(Self::ENV_VAR) {
            if let Some(q) = Self::parse(&envv) {
                return Ok(q);
            }
            warn!(
                "Invalid {} '{}', falling back to file/default",
                Self::ENV_VAR,
                envv
            );
        }
        Self::load_from(&APP_HOME)
    }

    /// File-backed half of [`JpegQuality::load`]
    ///
    /// # Errors
    ///
    /// Returns an error if reading or creating the config file fails.
    pub fn load_from(home: &AppHome) -> eyre::Result<JpegQuality> {
        let path = home.file_path(Self::FILE_NAME);
        if path.exists() {
            let s = fs::read_to_string(&path)?.trim().to_string();
            if let Some(q) = Self::parse(&s) {
                return Ok(q);
            }
            warn!(
                "Invalid {} contents: '{}', resetting to default",
                path.display(),
                s
            );
        }

        // create containing default
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut f = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        f.write_all(Self::DEFAULT.to_string().as_bytes())?;
        f.flush()?;
        Ok(JpegQuality(Self::DEFAULT))
    }

    /// Returns the path the file should live at
    ///
    /// # Errors
    ///
    /// This function does not return any errors.
    pub fn config_file_path() -> eyre::Result<PathBuf> {
        Ok(APP_HOME.file_path(Self::FILE_NAME))
    }

    /// Set the value by writing to the config file (creates dirs if needed).
    /// This also updates the in-memory static so subsequent calls in the same
    /// process immediately observe the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is out of range or writing the file fails.
    pub fn set_to(value: u8) -> eyre::Result<()> {
        Self::set_in(&APP_HOME, value)?;
        JPEG_QUALITY.store(value, Ordering::SeqCst);
        Ok(())
    }

    /// Write `value` to the config file under `home` without touching the static
    ///
    /// # Errors
    ///
    /// Returns an error if the value is out of range or writing the file fails.
    pub fn set_in(home: &AppHome, value: u8) -> eyre::Result<()> {
        if !(1..=100).contains(&value) {
            eyre::bail!("JPEG quality must be between 1 and 100, got {value}");
        }
        let path = home.file_path(Self::FILE_NAME);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, value.to_string().as_bytes())?;
        Ok(())
    }

    /// Convenience accessor
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

/// Public static that initializes using the rules described above.
/// Backed by `AtomicU8` so the `set_to` method can update it at runtime.
pub static JPEG_QUALITY: LazyLock<AtomicU8> = LazyLock::new(|| {
    let initial = JpegQuality::load()
        .map(|q| q.as_u8())
        .unwrap_or(JpegQuality::DEFAULT);
    AtomicU8::new(initial)
});

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_bounds() {
        assert_eq!(JpegQuality::parse(" 90 "), Some(JpegQuality(90)));
        assert_eq!(JpegQuality::parse("100"), Some(JpegQuality(100)));
        assert_eq!(JpegQuality::parse("0"), None);
        assert_eq!(JpegQuality::parse("101"), None);
        assert_eq!(JpegQuality::parse("high"), None);
    }

    #[test]
    fn invalid_file_resets_to_default() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = AppHome(td.path().to_path_buf());
        fs::write(home.file_path("jpeg_quality.txt"), "250")?;
        assert_eq!(JpegQuality::load_from(&home)?, JpegQuality(JpegQuality::DEFAULT));
        assert_eq!(fs::read_to_string(home.file_path("jpeg_quality.txt"))?, "80");
        Ok(())
    }

    #[test]
    fn set_in_round_trips() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = AppHome(td.path().to_path_buf());
        JpegQuality::set_in(&home, 55)?;
        assert_eq!(JpegQuality::load_from(&home)?, JpegQuality(55));
        assert!(JpegQuality::set_in(&home, 0).is_err());
        Ok(())
    }
}
