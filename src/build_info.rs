use std::fmt;

/// Read-only build metadata, fixed at compile time.
///
/// `REDPOWER_COMMIT` and `REDPOWER_BUILD_DATE` may be set in the build
/// environment by release tooling; both are empty otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: match option_env!("REDPOWER_COMMIT") {
                Some(commit) => commit,
                None => "",
            },
            date: match option_env!("REDPOWER_BUILD_DATE") {
                Some(date) => date,
                None => "",
            },
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "redpower  version: {} ({}) build date: {}",
            self.version, self.commit, self.date
        )
    }
}
