use std::io;
use std::process::{Command, Stdio};

use crate::data::terminals;
use crate::model::directory::DirectoryEntry;
use crate::model::profile::Profile;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("launching {profile} for {directory}: {source}")]
    Spawn {
        directory: String,
        profile: String,
        #[source]
        source: io::Error,
    },
}

/// Opens terminal sessions for enabled directories.
///
/// Returns the number of sessions started. Spawning is fire-and-forget: the
/// call returns once every spawn has been issued, and the first failure
/// aborts the rest of the batch.
pub trait Launcher {
    fn launch(
        &self,
        directories: &[DirectoryEntry],
        profiles: &[Profile],
        terminal: Option<&str>,
    ) -> Result<usize, LaunchError>;
}

/// One terminal session to open: a directory and the profile to run in it.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    pub directory: &'a DirectoryEntry,
    pub profile: &'a Profile,
}

/// Enabled entries in list order, each entry's profiles in assignment order.
/// IDs that don't resolve to a profile are skipped.
pub fn plan_sessions<'a>(
    directories: &'a [DirectoryEntry],
    profiles: &'a [Profile],
) -> Vec<Session<'a>> {
    directories
        .iter()
        .filter(|d| d.enabled)
        .flat_map(|directory| {
            directory.profile_ids.iter().filter_map(move |id| {
                profiles
                    .iter()
                    .find(|p| &p.id == id)
                    .map(|profile| Session { directory, profile })
            })
        })
        .collect()
}

/// Run `spawn` for each session, stopping at the first error.
pub fn run_plan<F>(plan: &[Session<'_>], mut spawn: F) -> Result<usize, LaunchError>
where
    F: FnMut(&Session<'_>) -> io::Result<()>,
{
    for (started, session) in plan.iter().enumerate() {
        if let Err(source) = spawn(session) {
            tracing::warn!(
                directory = %session.directory.name,
                profile = %session.profile.label,
                started,
                error = %source,
                "spawn failed, aborting remaining sessions"
            );
            return Err(LaunchError::Spawn {
                directory: session.directory.name.clone(),
                profile: session.profile.label.clone(),
                source,
            });
        }
        tracing::info!(
            directory = %session.directory.path.display(),
            profile = %session.profile.label,
            "session spawned"
        );
    }
    Ok(plan.len())
}

/// Launcher that spawns real terminal-emulator processes.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(
        &self,
        directories: &[DirectoryEntry],
        profiles: &[Profile],
        terminal: Option<&str>,
    ) -> Result<usize, LaunchError> {
        let plan = plan_sessions(directories, profiles);
        if plan.is_empty() {
            return Ok(0);
        }
        let term = match terminal {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => terminals::detect_terminal(),
        };
        tracing::info!(terminal = %term, sessions = plan.len(), "launching");
        run_plan(&plan, |session| {
            // The child handle is dropped on purpose: nobody waits for it.
            build_command(&term, session)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map(|_child| ())
        })
    }
}

#[cfg(not(any(target_os = "macos", windows)))]
fn build_command(term: &str, session: &Session<'_>) -> Command {
    let shell_cmd = format!(
        "cd {} && {}",
        shell_quote(&session.directory.path.to_string_lossy()),
        session.profile.cmd
    );
    let mut cmd = Command::new(term);
    match term {
        "kitty" => {}
        "wezterm" => {
            cmd.args(["start", "--"]);
        }
        "gnome-terminal" => {
            cmd.arg("--");
        }
        _ => {
            cmd.arg("-e");
        }
    }
    cmd.args(["bash", "-c", &shell_cmd]);
    cmd.current_dir(&session.directory.path);
    cmd
}

#[cfg(target_os = "macos")]
fn build_command(term: &str, session: &Session<'_>) -> Command {
    if term != "Terminal" {
        tracing::debug!(terminal = %term, "only Terminal.app is scripted, using it");
    }
    let script = format!(
        r#"tell application "Terminal" to do script "cd \"{}\" && {}""#,
        escape_applescript(&session.directory.path.to_string_lossy()),
        escape_applescript(&session.profile.cmd)
    );
    let mut cmd = Command::new("osascript");
    cmd.args(["-e", &script]);
    cmd
}

#[cfg(windows)]
fn build_command(_term: &str, session: &Session<'_>) -> Command {
    let mut cmd = Command::new("wt.exe");
    cmd.args(["-w", "0", "new-tab", "--title"])
        .arg(&session.profile.label)
        .arg("-d")
        .arg(&session.directory.path)
        .args(["--", "cmd", "/K"])
        .arg(&session.profile.cmd);
    cmd
}

/// Single-quote a string for POSIX shells.
#[cfg_attr(any(target_os = "macos", windows), allow(dead_code))]
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn escape_applescript(s: &str) -> String {
    s.replace('\\', r"\\").replace('"', "\\\"")
}
