//! Shell startup hook for auto-display.
//!
//! Enabling appends a marked block to the user's shell rc file that runs
//! `quoteme --silent` on every new shell unless `QUOTEME_AUTO=disabled`.
//! Disabling removes exactly that block. The text transforms are pure
//! functions; [`ShellRc`] applies them to the file on disk.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Comment line that marks the hook block.
pub const MARKER: &str = "# QuoteMe Auto-display";

/// Matches a hook block in either POSIX or fish syntax.
const HOOK_PATTERN: &str = concat!(
    r"\n# QuoteMe Auto-display\n",
    r#"(?:if \[ "\$QUOTEME_AUTO" != "disabled" \]; then|if test "\$QUOTEME_AUTO" != "disabled")\n"#,
    r".*\n",
    r"(?:fi|end)\n",
);

/// Errors reading or rewriting a shell startup file.
#[derive(Debug, Error)]
pub enum ShellError {
    /// `dirs` found no home directory to look for startup files in.
    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    /// The startup file could not be read or written.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// The startup file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The hook-matching regex failed to compile.
    #[error("Invalid hook pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Shell whose startup file holds the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// Z shell, `~/.zshrc`.
    Zsh,
    /// Bash, `~/.bashrc`. Also used for unknown shells.
    Bash,
    /// fish, `~/.config/fish/config.fish`.
    Fish,
}

impl ShellKind {
    /// Guess from a `$SHELL` value. Unknown shells get bash treatment.
    pub fn detect(shell: Option<&str>) -> Self {
        let shell = shell.unwrap_or_default();
        if shell.contains("zsh") {
            ShellKind::Zsh
        } else if shell.contains("fish") {
            ShellKind::Fish
        } else {
            ShellKind::Bash
        }
    }

    /// Shell named by `$SHELL`.
    pub fn from_env() -> Self {
        Self::detect(std::env::var("SHELL").ok().as_deref())
    }

    /// Startup file under `home`.
    pub fn rc_path(self, home: &Path) -> PathBuf {
        match self {
            ShellKind::Zsh => home.join(".zshrc"),
            ShellKind::Bash => home.join(".bashrc"),
            ShellKind::Fish => home.join(".config").join("fish").join("config.fish"),
        }
    }
}

/// Command line the hook runs: the quoted path of `exe`.
pub fn hook_command(exe: &Path) -> String {
    format!("\"{}\"", exe.display())
}

/// The full hook block, with leading and trailing newline.
pub fn hook_block(kind: ShellKind, command: &str) -> String {
    match kind {
        ShellKind::Fish => format!(
            "\n{MARKER}\nif test \"$QUOTEME_AUTO\" != \"disabled\"\n  {command} --silent\nend\n"
        ),
        ShellKind::Zsh | ShellKind::Bash => format!(
            "\n{MARKER}\nif [ \"$QUOTEME_AUTO\" != \"disabled\" ]; then\n  {command} --silent\nfi\n"
        ),
    }
}

/// Whether `contents` already carries the hook marker.
pub fn is_enabled(contents: &str) -> bool {
    contents.contains(MARKER)
}

/// `contents` with the hook appended, or `None` if it is already there.
pub fn with_hook(contents: &str, kind: ShellKind, command: &str) -> Option<String> {
    if is_enabled(contents) {
        return None;
    }
    Some(format!("{contents}{}", hook_block(kind, command)))
}

/// `contents` with every hook block removed, or `None` if nothing matched.
pub fn without_hook(contents: &str) -> Result<Option<String>, ShellError> {
    let pattern = Regex::new(HOOK_PATTERN)?;
    let stripped = pattern.replace_all(contents, "");
    if stripped == contents {
        Ok(None)
    } else {
        Ok(Some(stripped.into_owned()))
    }
}

/// Result of [`ShellRc::enable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableOutcome {
    /// Hook appended.
    Enabled,
    /// Marker was already present; file untouched.
    AlreadyEnabled,
}

/// Result of [`ShellRc::disable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableOutcome {
    /// Hook removed.
    Disabled,
    /// File exists but holds no hook.
    NotEnabled,
    /// No startup file at all.
    MissingFile,
}

/// A shell startup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRc {
    kind: ShellKind,
    path: PathBuf,
}

impl ShellRc {
    /// Startup file of `kind` at `path`.
    pub fn new(kind: ShellKind, path: PathBuf) -> Self {
        Self { kind, path }
    }

    /// The rc file of the current user's shell.
    ///
    /// # Errors
    ///
    /// `ShellError::NoHomeDirectory` when the home directory is unknown.
    pub fn detect() -> Result<Self, ShellError> {
        let home = dirs::home_dir().ok_or(ShellError::NoHomeDirectory)?;
        let kind = ShellKind::from_env();
        Ok(Self::new(kind, kind.rc_path(&home)))
    }

    /// Location of the startup file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shell the file belongs to.
    pub fn kind(&self) -> ShellKind {
        self.kind
    }

    fn read(&self) -> Result<Option<String>, ShellError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ShellError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&self, contents: &str) -> Result<(), ShellError> {
        let io_error = |source: io::Error| ShellError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&self.path, contents).map_err(io_error)
    }

    /// Whether the hook is present. A missing file counts as disabled.
    pub fn is_enabled(&self) -> Result<bool, ShellError> {
        Ok(self.read()?.as_deref().is_some_and(is_enabled))
    }

    /// Append the hook running `command`, creating the file if needed.
    pub fn enable(&self, command: &str) -> Result<EnableOutcome, ShellError> {
        let contents = self.read()?.unwrap_or_default();
        let Some(updated) = with_hook(&contents, self.kind, command) else {
            return Ok(EnableOutcome::AlreadyEnabled);
        };
        self.write(&updated)?;
        info!(path = %self.path.display(), "Added auto-display hook");
        Ok(EnableOutcome::Enabled)
    }

    /// Remove every hook block from the file.
    ///
    /// # Errors
    ///
    /// `ShellError::Io` if the file cannot be read or written.
    pub fn disable(&self) -> Result<DisableOutcome, ShellError> {
        let Some(contents) = self.read()? else {
            return Ok(DisableOutcome::MissingFile);
        };
        let Some(updated) = without_hook(&contents)? else {
            return Ok(DisableOutcome::NotEnabled);
        };
        self.write(&updated)?;
        info!(path = %self.path.display(), "Removed auto-display hook");
        Ok(DisableOutcome::Disabled)
    }
}
