use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Operations whose only argument is the input image
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ImageInputArgs {
    /// Image to convert
    #[arbitrary(with = arbitrary_path)]
    pub input: PathBuf,
}

impl ToArgs for ImageInputArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![self.input.clone().into_os_string()]
    }
}
