use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug, Default)]
pub struct GuiArgs {}

impl GuiArgs {
    /// # Errors
    ///
    /// Returns an error if the runtime or the window cannot be created.
    pub fn invoke(self) -> eyre::Result<()> {
        // Multi-threaded so the window can block in place
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(crate::gui::run_gui())
    }
}

impl ToArgs for GuiArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![]
    }
}
