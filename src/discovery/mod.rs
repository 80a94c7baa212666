//! Installed-executable discovery.
//!
//! After installation, the console script can land in different places
//! depending on the interpreter layout. Discovery checks the active venv's
//! scripts directory first, then walks the platform's install schemes in
//! order, returning the first directory that actually contains the
//! executable. When nothing matches, a bounded module-invocation probe
//! reports whether the package is at least importable — for diagnostics only.

pub mod schemes;

use std::path::PathBuf;
use std::time::Duration;

use crate::environment::ExecutionContext;
use crate::installer::{self, ProcessContext, PACKAGE_NAME};
use schemes::schemes_for;

/// Bound on the diagnostic module-invocation probe.
pub const MODULE_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Locate the directory containing the installed executable.
///
/// The search order is deterministic and platform-dependent; the first
/// existing match wins. Schemes that cannot be resolved from the context
/// are skipped.
pub fn locate_executable(ctx: &ExecutionContext) -> Option<PathBuf> {
    let binary = ctx.platform.executable_name(PACKAGE_NAME);

    // The active venv's scripts directory outranks every generic scheme.
    if let Some(dir) = ctx.venv_scripts_dir() {
        if dir.join(&binary).exists() {
            tracing::debug!(dir = %dir.display(), "found executable in venv scripts directory");
            return Some(absolute(dir));
        }
    }

    for scheme in schemes_for(ctx.platform) {
        let Some(dir) = scheme.scripts_dir(ctx) else {
            continue;
        };
        if dir.join(&binary).exists() {
            tracing::debug!(scheme = scheme.name, dir = %dir.display(), "found executable");
            return Some(absolute(dir));
        }
    }

    None
}

/// Check whether the package can be run as a module
/// (`<python> -m git2text --help`), within [`MODULE_PROBE_TIMEOUT`].
///
/// Diagnostic only: neither outcome is fatal to the installation.
pub fn module_invokable(ctx: &ExecutionContext, procs: &ProcessContext<'_>) -> bool {
    let python = installer::python_command(ctx);
    match (procs.probe)(
        &python,
        &["-m", PACKAGE_NAME, "--help"],
        Some(MODULE_PROBE_TIMEOUT),
    ) {
        Ok(result) => result.success,
        Err(e) => {
            tracing::debug!(error = %e, "module probe could not be spawned");
            false
        }
    }
}

fn absolute(dir: PathBuf) -> PathBuf {
    dir.canonicalize().unwrap_or(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Platform;
    use crate::shell::CommandResult;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn empty_ctx() -> ExecutionContext {
        ExecutionContext {
            platform: Platform::current(),
            elevated: false,
            venv: None,
            interpreter: None,
            prefix: None,
            base_prefix: None,
            user_base: None,
            home: None,
        }
    }

    fn place_binary(scripts_dir: &Path) {
        fs::create_dir_all(scripts_dir).unwrap();
        let name = Platform::current().executable_name(PACKAGE_NAME);
        fs::write(scripts_dir.join(name), "").unwrap();
    }

    fn subdir() -> &'static str {
        Platform::current().scripts_subdir()
    }

    #[test]
    fn venv_scripts_dir_wins_over_schemes() {
        let temp = TempDir::new().unwrap();
        let venv = temp.path().join("venv");
        let prefix = temp.path().join("prefix");
        place_binary(&venv.join(subdir()));
        place_binary(&prefix.join(subdir()));

        let mut ctx = empty_ctx();
        ctx.venv = Some(venv.clone());
        ctx.prefix = Some(prefix);

        let found = locate_executable(&ctx).unwrap();
        assert_eq!(found, venv.join(subdir()).canonicalize().unwrap());
    }

    #[test]
    fn scheme_scan_finds_prefix_install() {
        let temp = TempDir::new().unwrap();
        let prefix = temp.path().join("prefix");
        place_binary(&prefix.join(subdir()));

        let mut ctx = empty_ctx();
        ctx.prefix = Some(prefix.clone());

        let found = locate_executable(&ctx).unwrap();
        assert_eq!(found, prefix.join(subdir()).canonicalize().unwrap());
    }

    #[test]
    fn first_matching_scheme_wins() {
        let temp = TempDir::new().unwrap();
        let prefix = temp.path().join("prefix");
        let user_base = temp.path().join("user");
        place_binary(&prefix.join(subdir()));
        place_binary(&user_base.join(subdir()));

        let mut ctx = empty_ctx();
        ctx.prefix = Some(prefix.clone());
        ctx.user_base = Some(user_base);

        // prefix scheme precedes the per-user scheme on both platforms
        let found = locate_executable(&ctx).unwrap();
        assert_eq!(found, prefix.join(subdir()).canonicalize().unwrap());
    }

    #[test]
    fn unresolvable_schemes_are_skipped() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        place_binary(&home.join("bin"));

        let mut ctx = empty_ctx();
        // prefix and user_base stay None; only the per-home scheme resolves
        ctx.home = Some(home.clone());

        if ctx.platform == Platform::Posix {
            let found = locate_executable(&ctx).unwrap();
            assert_eq!(found, home.join("bin").canonicalize().unwrap());
        }
    }

    #[test]
    fn missing_everywhere_returns_none() {
        let temp = TempDir::new().unwrap();
        let mut ctx = empty_ctx();
        ctx.prefix = Some(temp.path().join("prefix"));
        ctx.home = Some(temp.path().join("home"));

        assert!(locate_executable(&ctx).is_none());
    }

    #[test]
    fn venv_without_binary_falls_through_to_schemes() {
        let temp = TempDir::new().unwrap();
        let venv = temp.path().join("venv");
        fs::create_dir_all(venv.join(subdir())).unwrap();
        let user_base = temp.path().join("user");
        place_binary(&user_base.join(subdir()));

        let mut ctx = empty_ctx();
        ctx.venv = Some(venv);
        ctx.user_base = Some(user_base.clone());

        let found = locate_executable(&ctx).unwrap();
        assert_eq!(found, user_base.join(subdir()).canonicalize().unwrap());
    }

    #[test]
    fn module_probe_is_bounded_and_reports_success() {
        let seen_timeout = RefCell::new(None);
        let run = |_: &str, _: &[&str]| {
            Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            ))
        };
        let probe = |_: &str, args: &[&str], timeout: Option<Duration>| {
            *seen_timeout.borrow_mut() = timeout;
            assert_eq!(args, ["-m", PACKAGE_NAME, "--help"]);
            Ok(CommandResult::success(
                "usage: git2text".to_string(),
                String::new(),
                Duration::ZERO,
            ))
        };
        let procs = ProcessContext {
            run: &run,
            probe: &probe,
        };

        assert!(module_invokable(&empty_ctx(), &procs));
        assert_eq!(*seen_timeout.borrow(), Some(MODULE_PROBE_TIMEOUT));
    }

    #[test]
    fn module_probe_failure_is_reported_not_fatal() {
        let run = |_: &str, _: &[&str]| {
            Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            ))
        };
        let probe = |_: &str, _: &[&str], _: Option<Duration>| {
            Ok(CommandResult::failure(
                Some(1),
                String::new(),
                String::new(),
                Duration::ZERO,
            ))
        };
        let procs = ProcessContext {
            run: &run,
            probe: &probe,
        };

        assert!(!module_invokable(&empty_ctx(), &procs));
    }

    #[test]
    fn module_probe_spawn_error_is_false() {
        let run = |_: &str, _: &[&str]| {
            Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            ))
        };
        let probe = |_: &str, _: &[&str], _: Option<Duration>| {
            Err::<CommandResult, _>(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no python",
            ))
        };
        let procs = ProcessContext {
            run: &run,
            probe: &probe,
        };

        assert!(!module_invokable(&empty_ctx(), &procs));
    }
}
