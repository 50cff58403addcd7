//! `--enable`, `--disable`, `--auto-status`.

use super::Commands;
use crate::model::AppError;
use crate::shell::{DisableOutcome, EnableOutcome, ShellRc};
use crate::view::Tone;
use std::io::Write;
use tracing::warn;

impl<W: Write> Commands<'_, W> {
    /// Install the startup hook running `command` and record it in the config.
    pub fn enable_auto_display(&mut self, rc: &ShellRc, command: &str) -> Result<(), AppError> {
        let outcome = match rc.enable(command) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.out
                    .notice(Tone::Error, &format!("❌ Error enabling auto-quotes: {e}"))?;
                return Err(e.into());
            }
        };

        if outcome == EnableOutcome::AlreadyEnabled {
            self.out
                .notice(Tone::Warning, "✅ Auto-quotes are already enabled!")?;
            return Ok(());
        }

        self.record_auto_display(true)?;
        let file_name = rc
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.out.notice(Tone::Success, "✅ Auto-quotes enabled!")?;
        self.out.notice(
            Tone::Info,
            &format!("📝 Added configuration to: {}", rc.path().display()),
        )?;
        self.out.notice(
            Tone::Warning,
            &format!("🔄 Please restart your terminal or run 'source {file_name}' to activate."),
        )?;
        self.out.notice(
            Tone::Dim,
            "💡 To temporarily disable, set: export QUOTEME_AUTO=disabled",
        )?;
        Ok(())
    }

    /// Remove the startup hook and record it in the config.
    pub fn disable_auto_display(&mut self, rc: &ShellRc) -> Result<(), AppError> {
        let outcome = match rc.disable() {
            Ok(outcome) => outcome,
            Err(e) => {
                self.out
                    .notice(Tone::Error, &format!("❌ Error disabling auto-quotes: {e}"))?;
                return Err(e.into());
            }
        };

        match outcome {
            DisableOutcome::MissingFile => {
                self.out
                    .notice(Tone::Warning, "⚠️  Shell configuration file not found.")?;
            }
            DisableOutcome::NotEnabled => {
                self.out
                    .notice(Tone::Warning, "⚠️  Auto-quotes were not enabled.")?;
            }
            DisableOutcome::Disabled => {
                self.record_auto_display(false)?;
                self.out.notice(Tone::Success, "✅ Auto-quotes disabled!")?;
                self.out.notice(
                    Tone::Info,
                    &format!("📝 Removed configuration from: {}", rc.path().display()),
                )?;
                self.out.notice(
                    Tone::Warning,
                    "🔄 Please restart your terminal for changes to take effect.",
                )?;
            }
        }
        Ok(())
    }

    /// Compare the shell hook with the config flag.
    pub fn auto_display_status(&mut self, rc: &ShellRc) -> Result<(), AppError> {
        let hooked = rc.is_enabled()?;
        let recorded = self.store.file().auto_display.unwrap_or(false);

        self.out.notice(Tone::Heading, "Auto-Display Status:")?;
        self.out.labeled("Shell Config: ", status_word(hooked), status_tone(hooked))?;
        self.out
            .labeled("User Config: ", status_word(recorded), status_tone(recorded))?;
        self.out
            .line(&format!("Config File: {}", rc.path().display()))?;
        self.out.blank_line()?;

        if hooked != recorded {
            self.out.notice(
                Tone::Warning,
                "⚠️  Configuration mismatch detected. Try running --enable or --disable to fix.",
            )?;
            self.out.blank_line()?;
        }
        Ok(())
    }

    /// Persist `auto_display`. Failure is reported; the shell edit stands.
    fn record_auto_display(&mut self, enabled: bool) -> Result<(), AppError> {
        self.config.auto_display = enabled;
        if let Err(e) = self.store.update(|file| file.auto_display = Some(enabled)) {
            warn!(error = %e, "Could not record auto_display in config");
            self.out
                .notice(Tone::Warning, "⚠️  Could not update config file")?;
        }
        Ok(())
    }
}

fn status_word(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

fn status_tone(enabled: bool) -> Tone {
    if enabled {
        Tone::Success
    } else {
        Tone::Error
    }
}
