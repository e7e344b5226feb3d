//! File watcher for `scale.toml` hot-reload.
//!
//! Watches `~/.config/liquid-scale/scale.toml` (or the `--config` path) and
//! hands freshly parsed `ScaleTokens` to a callback whenever the file is
//! written. A file that fails to parse is logged and skipped, so the running
//! screen keeps its previous configuration.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::tokens::ScaleTokens;

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/liquid-scale/`, or `$HOME/.config/liquid-scale/`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("liquid-scale");
    }
    home_dir().join(".config").join("liquid-scale")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("scale.toml")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir())
}

// ---------------------------------------------------------------------------
// File I/O helpers
// ---------------------------------------------------------------------------

/// Write `default_content` to `path` unless a file is already there.
pub fn ensure_default_config(path: &Path, default_content: &str) -> std::io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, default_content)?;
    info!(target: "config", path = %path.display(), "wrote default scale.toml");
    Ok(())
}

/// Load tokens from `path`, falling back to defaults when the file is
/// missing or invalid.
pub fn load_or_default(path: &Path) -> ScaleTokens {
    match ScaleTokens::load(path) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!(target: "config", "using default tokens: {e:#}");
            ScaleTokens::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Low-level watcher
// ---------------------------------------------------------------------------

/// Watch the *parent directory* of `path` and call `on_change` when the file
/// itself is created or modified.
///
/// Editors that save through a temp file and a rename never modify the
/// watched inode, so filtering directory events by filename is required.
pub fn spawn_watcher<F>(path: &Path, on_change: F) -> notify::Result<RecommendedWatcher>
where
    F: Fn() + Send + 'static,
{
    let target_filename = path
        .file_name()
        .ok_or_else(|| notify::Error::generic("config path has no file name"))?
        .to_os_string();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    return;
                }
                let affects_target = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().is_some_and(|f| f == target_filename));
                if affects_target {
                    on_change();
                }
            }
            Err(e) => warn!(target: "config", "watch error: {e}"),
        }
    })?;

    watcher.watch(&parent, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

// ---------------------------------------------------------------------------
// High-level ConfigWatcher
// ---------------------------------------------------------------------------

/// Owns the file-system watcher for `scale.toml`. Dropping it stops watching.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ConfigWatcher {
    /// Start watching `path`. `on_reload` receives each successfully parsed
    /// revision of the file; the callback runs on the watcher's thread.
    pub fn start<F>(path: PathBuf, on_reload: F) -> anyhow::Result<Self>
    where
        F: Fn(ScaleTokens) + Send + 'static,
    {
        let watched = path.clone();
        let watcher = spawn_watcher(&path, move || {
            reload(&watched, &on_reload);
        })?;

        info!(target: "config", path = %path.display(), "watching for changes");
        Ok(Self {
            _watcher: watcher,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Re-read `path` and hand the tokens to `on_reload`. An unreadable or
/// invalid file is logged and skipped. Returns whether `on_reload` ran.
fn reload(path: &Path, on_reload: &impl Fn(ScaleTokens)) -> bool {
    match ScaleTokens::load(path) {
        Ok(tokens) => {
            info!(target: "config", path = %path.display(), "scale.toml reloaded");
            on_reload(tokens);
            true
        }
        Err(e) => {
            warn!(target: "config", "ignoring invalid scale.toml: {e:#}");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// Commented default file. Values match the compiled defaults, so the file
/// is a no-op on first load but documents every key.
pub fn default_config_content() -> String {
    r#"# Liquid scale configuration. Saved changes apply immediately.
# Missing values use compiled defaults; delete a line to reset it.

[palette]
# RGBA, each channel 0.0-1.0
canvas = [1.0, 1.0, 1.0, 1.0]
liquid = [1.0, 0.0, 0.0, 1.0]
top_bar = [1.0, 1.0, 1.0, 1.0]
bottom_bar = [0.2235, 0.2902, 0.4863, 1.0]
ruler = [0.0, 1.0, 1.0, 1.0]
scale_ends = [0.0, 1.0, 1.0, 0.5]
label_top = [0.0, 0.0, 1.0, 0.7]
label_bottom = [1.0, 1.0, 1.0, 1.0]

[chrome]
top_bar_height = 80.0
bottom_bar_height = 80.0
ruler_inset = 20.0      # Ruler distance from the right edge
ruler_ticks = 12
tick_width = 50.0
tick_height = 3.0

[gesture]
control_point_size = 1.0
center_x_mode = "delta"        # "delta" or "pointer"
settle_target = "center"       # "center" or "midpoint"
ignore_outside_canvas = true

[spring]
duration = 0.7          # Seconds
damping_ratio = 0.2     # Below 1.0 wobbles
settle_epsilon = 0.001  # Envelope left when the duration ends
"#
    .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
