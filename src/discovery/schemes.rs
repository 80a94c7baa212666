//! Installation-path schemes.
//!
//! Where an installed console script lands depends on how the interpreter was
//! set up: system-wide, per-user, per-home, or per-venv. Each convention is a
//! [`SchemeDef`] in one static table, so the discovery routine stays a plain
//! ordered scan and adding a scheme is a data change.

use std::path::PathBuf;

use crate::environment::{ExecutionContext, Platform};

/// A named, platform-specific convention for where console scripts are placed.
pub struct SchemeDef {
    /// Scheme name (matches the interpreter's sysconfig vocabulary).
    pub name: &'static str,
    /// Platform this scheme applies to.
    pub platform: Platform,
    /// Resolve the scheme's scripts directory from the context snapshot.
    /// `None` means the scheme cannot be resolved here and is skipped.
    lookup: fn(&ExecutionContext) -> Option<PathBuf>,
}

impl SchemeDef {
    /// The scripts directory this scheme would install into, if resolvable.
    pub fn scripts_dir(&self, ctx: &ExecutionContext) -> Option<PathBuf> {
        (self.lookup)(ctx)
    }
}

/// All known schemes, in search order per platform.
///
/// The order mirrors the interpreter's own precedence: system prefix first,
/// then per-user, per-home, and finally the venv naming scheme.
pub const SCHEMES: &[SchemeDef] = &[
    SchemeDef {
        name: "posix_prefix",
        platform: Platform::Posix,
        lookup: |ctx| ctx.prefix.as_ref().map(|p| p.join("bin")),
    },
    SchemeDef {
        name: "posix_user",
        platform: Platform::Posix,
        lookup: |ctx| ctx.user_base.as_ref().map(|p| p.join("bin")),
    },
    SchemeDef {
        name: "posix_home",
        platform: Platform::Posix,
        lookup: |ctx| ctx.home.as_ref().map(|p| p.join("bin")),
    },
    SchemeDef {
        name: "posix_venv",
        platform: Platform::Posix,
        lookup: |ctx| ctx.venv.as_ref().map(|p| p.join("bin")),
    },
    SchemeDef {
        name: "nt",
        platform: Platform::Windows,
        lookup: |ctx| ctx.prefix.as_ref().map(|p| p.join("Scripts")),
    },
    SchemeDef {
        name: "nt_user",
        platform: Platform::Windows,
        lookup: |ctx| ctx.user_base.as_ref().map(|p| p.join("Scripts")),
    },
    SchemeDef {
        name: "nt_venv",
        platform: Platform::Windows,
        lookup: |ctx| ctx.venv.as_ref().map(|p| p.join("Scripts")),
    },
];

/// Schemes applicable to one platform, in deterministic search order.
pub fn schemes_for(platform: Platform) -> impl Iterator<Item = &'static SchemeDef> {
    SCHEMES.iter().filter(move |s| s.platform == platform)
}
