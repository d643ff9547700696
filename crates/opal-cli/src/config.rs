//! Locating the dispatcher binary for `opal-job`.
//!
//! Resolution chain: CLI flag > `OPAL_DISPATCHER` env var > `opal-dispatch`
//! next to the running executable > `opal-dispatch` on `PATH`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the dispatcher path.
pub const DISPATCHER_ENV: &str = "OPAL_DISPATCHER";

/// File name of the dispatcher binary, without platform suffix.
pub const DISPATCHER_BIN: &str = "opal-dispatch";

/// Resolve the dispatcher path from the flag, the environment and the
/// location of the current executable.
pub fn resolve_dispatcher(cli_dispatcher: Option<&Path>) -> PathBuf {
    resolve_dispatcher_from(
        cli_dispatcher,
        std::env::var_os(DISPATCHER_ENV),
        std::env::current_exe().ok(),
    )
}

/// Same as [`resolve_dispatcher`], with every input passed explicitly.
///
/// An empty env value is treated as unset.
pub fn resolve_dispatcher_from(
    cli_dispatcher: Option<&Path>,
    env_dispatcher: Option<OsString>,
    current_exe: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = cli_dispatcher {
        return path.to_path_buf();
    }

    if let Some(value) = env_dispatcher.filter(|v| !v.is_empty()) {
        return PathBuf::from(value);
    }

    let file_name = format!("{DISPATCHER_BIN}{}", std::env::consts::EXE_SUFFIX);
    if let Some(sibling) = current_exe
        .as_deref()
        .and_then(Path::parent)
        .map(|dir| dir.join(&file_name))
        .filter(|candidate| candidate.is_file())
    {
        return sibling;
    }

    tracing::debug!("no dispatcher next to current executable; relying on PATH");
    PathBuf::from(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin_name() -> String {
        format!("{DISPATCHER_BIN}{}", std::env::consts::EXE_SUFFIX)
    }

    #[test]
    fn cli_flag_wins() {
        let resolved = resolve_dispatcher_from(
            Some(Path::new("/opt/opal/flag-dispatch")),
            Some(OsString::from("/opt/opal/env-dispatch")),
            None,
        );
        assert_eq!(resolved, PathBuf::from("/opt/opal/flag-dispatch"));
    }

    #[test]
    fn env_beats_sibling() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(bin_name()), "").unwrap();

        let resolved = resolve_dispatcher_from(
            None,
            Some(OsString::from("/opt/opal/env-dispatch")),
            Some(tmp.path().join("opal-job")),
        );
        assert_eq!(resolved, PathBuf::from("/opt/opal/env-dispatch"));
    }

    #[test]
    fn empty_env_is_ignored() {
        let resolved = resolve_dispatcher_from(None, Some(OsString::new()), None);
        assert_eq!(resolved, PathBuf::from(bin_name()));
    }

    #[test]
    fn sibling_of_current_exe_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        let sibling = tmp.path().join(bin_name());
        std::fs::write(&sibling, "").unwrap();

        let resolved = resolve_dispatcher_from(None, None, Some(tmp.path().join("opal-job")));
        assert_eq!(resolved, sibling);
    }

    #[test]
    fn falls_back_to_path_lookup() {
        let tmp = tempfile::tempdir().unwrap();
        let resolved = resolve_dispatcher_from(None, None, Some(tmp.path().join("opal-job")));
        assert_eq!(resolved, PathBuf::from(bin_name()));
    }
}
