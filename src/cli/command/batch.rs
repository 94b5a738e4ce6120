use crate::batch::convert_folder_to_webp;
use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::conversion::ConversionSettings;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Only files directly inside the folder are converted
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct BatchArgs {
    /// Folder holding the images
    #[arbitrary(with = arbitrary_path)]
    pub folder: PathBuf,
}

impl BatchArgs {
    /// # Errors
    ///
    /// Returns an error if the folder cannot be listed or any file failed to convert.
    pub fn invoke(self) -> eyre::Result<()> {
        let settings = ConversionSettings::load();
        let rt = tokio::runtime::Runtime::new()?;
        let report = rt.block_on(convert_folder_to_webp(&self.folder, &settings))?;
        for (path, e) in &report.failures {
            eprintln!("{}: {}", path.display(), e);
        }
        println!("{report}");
        if !report.is_success() {
            eyre::bail!(
                "{} of {} images failed to convert",
                report.failures.len(),
                report.failures.len() + report.converted.len()
            );
        }
        Ok(())
    }
}

impl ToArgs for BatchArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![self.folder.clone().into_os_string()]
    }
}
