use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use std::env;
use std::ops::Deref;
use std::path::Path;
use std::path::PathBuf;
use tracing::warn;

const CONFIG_DIR_ENV_VAR: &str = "IMAGE_OPTIMIZER_CONFIG_DIR";
const APP_NAME: &str = "image-optimizer";

/// Directory holding the settings files (`ffmpeg_path.txt`, `jpeg_quality.txt`)
#[derive(Clone, Debug)]
pub struct AppHome(pub PathBuf);

impl AppHome {
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dir(&self) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.0)?;
        Ok(())
    }

    /// `$IMAGE_OPTIMIZER_CONFIG_DIR` when set and non-empty, else the platform config dir
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no config directory.
    pub fn resolve() -> eyre::Result<AppHome> {
        match env::var_os(CONFIG_DIR_ENV_VAR) {
            Some(dir) if !dir.is_empty() => Ok(AppHome(PathBuf::from(dir))),
            _ => ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| AppHome(dirs.config_dir().to_path_buf()))
                .ok_or_else(|| eyre::eyre!("No config directory for {APP_NAME} on this platform")),
        }
    }
}

impl Deref for AppHome {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.0.as_path()
    }
}

/// Settings directory for this process; a temp dir stands in when none can be resolved
pub static APP_HOME: Lazy<AppHome> = Lazy::new(|| {
    AppHome::resolve().unwrap_or_else(|e| {
        let fallback = env::temp_dir().join(APP_NAME);
        warn!("{}. Keeping settings in {}", e, fallback.display());
        AppHome(fallback)
    })
});

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn ensure_dir_creates_nested_home() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = AppHome(td.path().join("a").join("b"));
        home.ensure_dir()?;
        assert!(home.is_dir());
        assert_eq!(home.file_path("x.txt"), td.path().join("a").join("b").join("x.txt"));
        Ok(())
    }
}
