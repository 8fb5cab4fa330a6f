use std::path::{Path, PathBuf};

#[cfg(target_os = "macos")]
const CANDIDATES: &[&str] = &[
    "Terminal",
    "Ghostty",
    "iTerm",
    "Warp",
    "Kitty",
    "Alacritty",
    "Hyper",
];
#[cfg(target_os = "macos")]
const FALLBACK: &str = "Terminal";

#[cfg(windows)]
const CANDIDATES: &[&str] = &["wt"];
#[cfg(windows)]
const FALLBACK: &str = "wt";

#[cfg(not(any(target_os = "macos", windows)))]
const CANDIDATES: &[&str] = &[
    "ghostty",
    "alacritty",
    "kitty",
    "wezterm",
    "warp-terminal",
    "gnome-terminal",
    "konsole",
    "xfce4-terminal",
    "mate-terminal",
    "xterm",
    "urxvt",
    "terminator",
];
#[cfg(not(any(target_os = "macos", windows)))]
const FALLBACK: &str = "xterm";

/// Terminal emulators installed on this machine, in preference order.
/// Never empty: falls back to the platform's conventional terminal.
pub fn available_terminals() -> Vec<String> {
    let mut found: Vec<String> = CANDIDATES
        .iter()
        .filter(|name| is_installed(name))
        .map(|name| name.to_string())
        .collect();
    if found.is_empty() {
        found.push(FALLBACK.to_string());
    }
    found
}

/// Pick a terminal when none is configured: `$TERMINAL`, then markers left
/// in the environment by the terminal we're running in, then the first
/// installed candidate.
pub fn detect_terminal() -> String {
    if let Ok(term) = std::env::var("TERMINAL") {
        if !term.is_empty() && find_on_path(&term).is_some() {
            return term;
        }
    }
    if let Some(term) = from_environment_markers() {
        return term.to_string();
    }
    available_terminals()
        .into_iter()
        .next()
        .unwrap_or_else(|| FALLBACK.to_string())
}

fn from_environment_markers() -> Option<&'static str> {
    let set = |var: &str| std::env::var_os(var).is_some_and(|v| !v.is_empty());

    if cfg!(target_os = "macos") {
        match std::env::var("TERM_PROGRAM").ok().as_deref() {
            Some("iTerm.app") => return Some("iTerm"),
            Some("Apple_Terminal") => return Some("Terminal"),
            Some("WarpTerminal") => return Some("Warp"),
            Some("ghostty") => return Some("Ghostty"),
            _ => {}
        }
        if set("GHOSTTY_RESOURCES_DIR") {
            return Some("Ghostty");
        }
        if set("KITTY_WINDOW_ID") {
            return Some("Kitty");
        }
        return None;
    }

    if set("WT_SESSION") {
        return Some("wt");
    }
    if set("KITTY_WINDOW_ID") {
        return Some("kitty");
    }
    if set("ALACRITTY_SOCKET") || set("ALACRITTY_LOG") {
        return Some("alacritty");
    }
    if set("WEZTERM_PANE") {
        return Some("wezterm");
    }
    if set("GHOSTTY_RESOURCES_DIR") {
        return Some("ghostty");
    }
    None
}

#[cfg(target_os = "macos")]
fn is_installed(name: &str) -> bool {
    let bundle = match name {
        "Terminal" => return Path::new("/System/Applications/Utilities/Terminal.app").exists(),
        "Kitty" => "kitty.app".to_string(),
        other => format!("{}.app", other),
    };
    if Path::new("/Applications").join(&bundle).exists() {
        return true;
    }
    dirs::home_dir()
        .map(|h| h.join("Applications").join(&bundle).exists())
        .unwrap_or(false)
}

#[cfg(not(target_os = "macos"))]
fn is_installed(name: &str) -> bool {
    find_on_path(name).is_some()
}

/// Locate an executable on `PATH`.
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| {
        let full = dir.join(program);
        if full.is_file() {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", program));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_terminals_is_never_empty() {
        let terms = available_terminals();
        assert!(!terms.is_empty());
        for t in &terms {
            assert!(!t.is_empty());
        }
    }

    #[test]
    fn detect_terminal_returns_a_name() {
        assert!(!detect_terminal().is_empty());
    }

    #[test]
    fn find_on_path_rejects_missing_programs() {
        assert!(find_on_path("definitely-not-a-real-terminal-4711").is_none());
        assert!(find_on_path("/nonexistent/dir/prog").is_none());
    }
}
