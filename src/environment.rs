//! Execution-context snapshot.
//!
//! Everything the installer needs to know about the surrounding environment
//! (platform, privileges, virtual environment, interpreter layout) is gathered
//! once at startup into an immutable [`ExecutionContext`]. Later stages only
//! read the snapshot, so a mid-run environment change cannot produce
//! inconsistent decisions.
//!
//! Environment-variable lookups and the interpreter query are injectable
//! ([`ExecutionContext::probe_with`]) so tests never depend on the host's
//! Python installation.

use std::path::{Path, PathBuf};

use crate::shell::{self, CommandOptions};

/// Target platform family, as far as install layouts are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Name of the scripts/binaries subdirectory inside a prefix.
    pub fn scripts_subdir(self) -> &'static str {
        match self {
            Platform::Posix => "bin",
            Platform::Windows => "Scripts",
        }
    }

    /// Platform-specific executable filename for a tool.
    pub fn executable_name(self, tool: &str) -> String {
        match self {
            Platform::Posix => tool.to_string(),
            Platform::Windows => format!("{tool}.exe"),
        }
    }
}

/// Interpreter layout reported by a single `python -c` invocation.
#[derive(Debug, Clone, Default)]
pub struct InterpreterInfo {
    pub prefix: Option<PathBuf>,
    pub base_prefix: Option<PathBuf>,
    pub user_base: Option<PathBuf>,
}

/// Immutable snapshot of the execution environment, probed once at startup.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub platform: Platform,
    /// Running with root/admin privileges. Check failures degrade to `false`.
    pub elevated: bool,
    /// Virtual environment root, if one is active.
    pub venv: Option<PathBuf>,
    /// Resolved Python interpreter, if one was found.
    pub interpreter: Option<PathBuf>,
    pub prefix: Option<PathBuf>,
    pub base_prefix: Option<PathBuf>,
    pub user_base: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl ExecutionContext {
    /// Probe the real environment.
    pub fn probe() -> Self {
        Self::probe_with(|key| std::env::var(key), query_interpreter)
    }

    /// Probe with injectable env-var lookup and interpreter query.
    pub fn probe_with<E, Q>(env_fn: E, query_fn: Q) -> Self
    where
        E: Fn(&str) -> Result<String, std::env::VarError>,
        Q: Fn(&Path) -> Option<InterpreterInfo>,
    {
        let platform = Platform::current();
        let home = dirs::home_dir();

        // An exported VIRTUAL_ENV pointing at a real directory is the
        // authoritative venv signal.
        let venv_from_env = env_fn("VIRTUAL_ENV")
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.is_dir());

        let interpreter = resolve_interpreter(platform, venv_from_env.as_deref(), &env_fn);

        let info = interpreter
            .as_deref()
            .and_then(&query_fn)
            .unwrap_or_default();

        // Fall back to the interpreter's own view: a prefix differing from
        // the base prefix means it lives inside a venv.
        let venv = venv_from_env.or_else(|| match (&info.prefix, &info.base_prefix) {
            (Some(prefix), Some(base)) if prefix != base => Some(prefix.clone()),
            _ => None,
        });

        let ctx = Self {
            platform,
            elevated: shell::is_elevated(),
            venv,
            interpreter,
            prefix: info.prefix,
            base_prefix: info.base_prefix,
            user_base: info.user_base,
            home,
        };

        tracing::debug!(
            platform = ?ctx.platform,
            elevated = ctx.elevated,
            venv = ?ctx.venv,
            interpreter = ?ctx.interpreter,
            "probed execution context"
        );

        ctx
    }

    /// Whether the snapshot was taken inside a virtual environment.
    pub fn in_virtual_env(&self) -> bool {
        self.venv.is_some()
    }

    /// The active venv's scripts directory, if any.
    pub fn venv_scripts_dir(&self) -> Option<PathBuf> {
        self.venv
            .as_ref()
            .map(|root| root.join(self.platform.scripts_subdir()))
    }
}

/// Pick the interpreter: the venv's own python when a venv is active,
/// otherwise the first `python3`/`python` on PATH.
fn resolve_interpreter<E>(platform: Platform, venv: Option<&Path>, env_fn: &E) -> Option<PathBuf>
where
    E: Fn(&str) -> Result<String, std::env::VarError>,
{
    if let Some(root) = venv {
        let candidate = root
            .join(platform.scripts_subdir())
            .join(platform.executable_name("python"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let path_var = env_fn("PATH").ok()?;
    let entries: Vec<PathBuf> = std::env::split_paths(&path_var).collect();
    for name in ["python3", "python"] {
        if let Some(found) = find_on_path(&platform.executable_name(name), &entries) {
            return Some(found);
        }
    }
    None
}

/// First PATH entry containing an executable with the given filename.
fn find_on_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

/// Ask the interpreter for its prefix layout in one invocation.
fn query_interpreter(python: &Path) -> Option<InterpreterInfo> {
    let script = "import sys, site\nprint(sys.prefix)\nprint(sys.base_prefix)\nprint(site.getuserbase())";
    let result = shell::execute(
        &python.to_string_lossy(),
        &["-c", script],
        &CommandOptions::captured(),
    )
    .ok()?;

    if !result.success {
        tracing::debug!(code = ?result.exit_code, "interpreter layout query failed");
        return None;
    }

    let mut lines = result.stdout.lines().map(str::trim);
    let field = |line: Option<&str>| line.filter(|s| !s.is_empty()).map(PathBuf::from);
    Some(InterpreterInfo {
        prefix: field(lines.next()),
        base_prefix: field(lines.next()),
        user_base: field(lines.next()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::VarError;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Result<String, VarError> {
        Err(VarError::NotPresent)
    }

    fn no_query(_: &Path) -> Option<InterpreterInfo> {
        None
    }

    #[test]
    fn platform_current_matches_target() {
        let platform = Platform::current();
        if cfg!(windows) {
            assert_eq!(platform, Platform::Windows);
        } else {
            assert_eq!(platform, Platform::Posix);
        }
    }

    #[test]
    fn scripts_subdir_per_platform() {
        assert_eq!(Platform::Posix.scripts_subdir(), "bin");
        assert_eq!(Platform::Windows.scripts_subdir(), "Scripts");
    }

    #[test]
    fn executable_name_adds_extension_on_windows() {
        assert_eq!(Platform::Posix.executable_name("git2text"), "git2text");
        assert_eq!(
            Platform::Windows.executable_name("git2text"),
            "git2text.exe"
        );
    }

    #[test]
    fn no_signals_means_no_venv() {
        let ctx = ExecutionContext::probe_with(no_env, no_query);
        assert!(!ctx.in_virtual_env());
        assert!(ctx.venv_scripts_dir().is_none());
    }

    #[test]
    fn virtual_env_var_detected_when_dir_exists() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let root_str = root.to_string_lossy().to_string();

        let ctx = ExecutionContext::probe_with(
            move |key| {
                if key == "VIRTUAL_ENV" {
                    Ok(root_str.clone())
                } else {
                    Err(VarError::NotPresent)
                }
            },
            no_query,
        );

        assert_eq!(ctx.venv.as_deref(), Some(root.as_path()));
        assert_eq!(
            ctx.venv_scripts_dir(),
            Some(root.join(Platform::current().scripts_subdir()))
        );
    }

    #[test]
    fn virtual_env_var_ignored_when_dir_missing() {
        let ctx = ExecutionContext::probe_with(
            |key| {
                if key == "VIRTUAL_ENV" {
                    Ok("/nonexistent/venv/path".to_string())
                } else {
                    Err(VarError::NotPresent)
                }
            },
            no_query,
        );

        assert!(!ctx.in_virtual_env());
    }

    #[test]
    fn prefix_mismatch_implies_venv() {
        let temp = TempDir::new().unwrap();
        let python_dir = temp.path().join("pybin");
        fs::create_dir_all(&python_dir).unwrap();
        let python = python_dir.join(Platform::current().executable_name("python3"));
        fs::write(&python, "").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();
        }

        let path_var = python_dir.to_string_lossy().to_string();
        let ctx = ExecutionContext::probe_with(
            move |key| {
                if key == "PATH" {
                    Ok(path_var.clone())
                } else {
                    Err(VarError::NotPresent)
                }
            },
            |_| {
                Some(InterpreterInfo {
                    prefix: Some(PathBuf::from("/proj/.venv")),
                    base_prefix: Some(PathBuf::from("/usr")),
                    user_base: Some(PathBuf::from("/home/u/.local")),
                })
            },
        );

        assert_eq!(ctx.venv, Some(PathBuf::from("/proj/.venv")));
        assert_eq!(ctx.prefix, Some(PathBuf::from("/proj/.venv")));
        assert_eq!(ctx.base_prefix, Some(PathBuf::from("/usr")));
    }

    #[test]
    fn equal_prefixes_are_not_a_venv() {
        let temp = TempDir::new().unwrap();
        let python_dir = temp.path().join("pybin");
        fs::create_dir_all(&python_dir).unwrap();
        let python = python_dir.join(Platform::current().executable_name("python3"));
        fs::write(&python, "").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();
        }

        let path_var = python_dir.to_string_lossy().to_string();
        let ctx = ExecutionContext::probe_with(
            move |key| {
                if key == "PATH" {
                    Ok(path_var.clone())
                } else {
                    Err(VarError::NotPresent)
                }
            },
            |_| {
                Some(InterpreterInfo {
                    prefix: Some(PathBuf::from("/usr")),
                    base_prefix: Some(PathBuf::from("/usr")),
                    user_base: None,
                })
            },
        );

        assert!(!ctx.in_virtual_env());
        assert_eq!(ctx.prefix, Some(PathBuf::from("/usr")));
    }

    #[test]
    fn venv_interpreter_preferred_over_path() {
        let temp = TempDir::new().unwrap();
        let venv = temp.path().join("venv");
        let scripts = venv.join(Platform::current().scripts_subdir());
        fs::create_dir_all(&scripts).unwrap();
        let python = scripts.join(Platform::current().executable_name("python"));
        fs::write(&python, "").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();
        }

        let venv_str = venv.to_string_lossy().to_string();
        let ctx = ExecutionContext::probe_with(
            move |key| {
                if key == "VIRTUAL_ENV" {
                    Ok(venv_str.clone())
                } else {
                    Err(VarError::NotPresent)
                }
            },
            no_query,
        );

        assert_eq!(ctx.interpreter, Some(python));
    }

    #[cfg(unix)]
    #[test]
    fn find_on_path_skips_non_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        fs::create_dir_all(&dir_a).unwrap();
        fs::create_dir_all(&dir_b).unwrap();

        fs::write(dir_a.join("python3"), "").unwrap();
        fs::set_permissions(dir_a.join("python3"), fs::Permissions::from_mode(0o644)).unwrap();
        fs::write(dir_b.join("python3"), "").unwrap();
        fs::set_permissions(dir_b.join("python3"), fs::Permissions::from_mode(0o755)).unwrap();

        let found = find_on_path("python3", &[dir_a, dir_b.clone()]);
        assert_eq!(found, Some(dir_b.join("python3")));
    }
}
