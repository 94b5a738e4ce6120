use crate::cli::arbitrary_values::arbitrary_path;
use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

/// Where JSON-formatted logs go, if anywhere
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum JsonLogBehaviour {
    /// Human-readable logs on stderr only
    #[default]
    None,
    /// JSON lines on stderr instead of human-readable logs
    Stderr,
    /// Human-readable logs on stderr, JSON lines appended to this file
    File(PathBuf),
}

impl JsonLogBehaviour {
    #[must_use]
    pub fn to_arg(&self) -> Option<OsString> {
        match self {
            JsonLogBehaviour::None => None,
            JsonLogBehaviour::Stderr => Some("stderr".into()),
            JsonLogBehaviour::File(path) => Some(path.clone().into_os_string()),
        }
    }
}

impl FromStr for JsonLogBehaviour {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stderr" | "-" => Ok(JsonLogBehaviour::Stderr),
            path => Ok(JsonLogBehaviour::File(PathBuf::from(path))),
        }
    }
}

impl<'a> Arbitrary<'a> for JsonLogBehaviour {
    // `None` is spelled by leaving the flag off, so it is never generated here
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        if u.arbitrary()? {
            Ok(JsonLogBehaviour::Stderr)
        } else {
            Ok(JsonLogBehaviour::File(arbitrary_path(u)?))
        }
    }
}
