use crate::app_home::APP_HOME;
use crate::app_home::AppHome;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Location of the ffmpeg executable used for video re-encodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FfmpegPath(pub PathBuf);

impl FfmpegPath {
    /// Resolved through `PATH` when left at the default
    pub const DEFAULT: &'static str = "ffmpeg";
    const FILE_NAME: &'static str = "ffmpeg_path.txt";
    const ENV_VAR: &'static str = "IMAGE_OPTIMIZER_FFMPEG";

    /// Loads resolving rules:
    /// 1. If $`IMAGE_OPTIMIZER_FFMPEG` is set -> use it (and DO NOT create file)
    /// 2. Otherwise, look for `${config_dir}/ffmpeg_path.txt`
    ///    - if file exists and is not blank, use its trimmed contents
    ///    - otherwise, create the file containing the default and return default
    ///
    /// # Errors
    ///
    /// Returns an error if reading or creating the config file fails.
    pub fn load() -> eyre::Result<FfmpegPath> {
        if let Ok(envv) = env::var(Self::ENV_VAR)
            && !envv.trim().is_empty()
        {
            return Ok(FfmpegPath(PathBuf::from(envv.trim())));
        }
        Self::load_from(&APP_HOME)
    }

    /// File-backed half of [`FfmpegPath::load`]
    ///
    /// # Errors
    ///
    /// Returns an error if reading or creating the config file fails.
    pub fn load_from(home: &AppHome) -> eyre::Result<FfmpegPath> {
        let path = home.file_path(Self::FILE_NAME);
        if path.exists() {
            let s = fs::read_to_string(&path)?.trim().to_string();
            if !s.is_empty() {
                return Ok(FfmpegPath(PathBuf::from(s)));
            }
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
        f.write_all(Self::DEFAULT.as_bytes())?;
        f.flush()?;
        Ok(FfmpegPath(PathBuf::from(Self::DEFAULT)))
    }

    /// Returns the path the file should live at
    ///
    /// # Errors
    ///
    /// This function does not return any errors.
    pub fn config_file_path() -> eyre::Result<PathBuf> {
        Ok(APP_HOME.file_path(Self::FILE_NAME))
    }

    /// Persist a new executable path.
    /// The next conversion picks it up; nothing is cached in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the config file fails.
    pub fn set_to(ffmpeg: &Path) -> eyre::Result<()> {
        Self::set_in(&APP_HOME, ffmpeg)
    }

    /// [`FfmpegPath::set_to`] against an explicit home
    ///
    /// # Errors
    ///
    /// Returns an error if writing the config file fails.
    pub fn set_in(home: &AppHome, ffmpeg: &Path) -> eyre::Result<()> {
        home.ensure_dir()?;
        fs::write(
            home.file_path(Self::FILE_NAME),
            ffmpeg.as_os_str().as_encoded_bytes(),
        )?;
        Ok(())
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}
