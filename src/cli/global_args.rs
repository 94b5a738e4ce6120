use crate::cli::arbitrary_values::arbitrary_log_filter;
use crate::cli::json_log_behaviour::JsonLogBehaviour;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug, Default)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[clap(long, global = true)]
    pub debug: bool,

    /// Log filter in `RUST_LOG` syntax; wins over --debug
    #[clap(long, global = true, value_name = "FILTER")]
    #[arbitrary(with = arbitrary_log_filter)]
    pub log_filter: Option<String>,

    /// Emit JSON logs to `stderr`, or append them to the given file
    #[clap(long, global = true, value_name = "stderr|PATH")]
    pub json: Option<JsonLogBehaviour>,
}

impl GlobalArgs {
    /// Explicit log filter, if the flags ask for one. `None` defers to `RUST_LOG`.
    #[must_use]
    pub fn log_level(&self) -> Option<String> {
        match (&self.log_filter, self.debug) {
            (Some(filter), _) => Some(filter.clone()),
            (None, true) => Some("debug".to_string()),
            (None, false) => None,
        }
    }

    #[must_use]
    pub fn json_log_behaviour(&self) -> JsonLogBehaviour {
        self.json.clone().unwrap_or_default()
    }
}

impl ToArgs for GlobalArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if self.debug {
            args.push("--debug".into());
        }
        if let Some(filter) = &self.log_filter {
            args.push("--log-filter".into());
            args.push(filter.into());
        }
        if let Some(arg) = self.json.as_ref().and_then(JsonLogBehaviour::to_arg) {
            args.push("--json".into());
            args.push(arg);
        }
        args
    }
}
