//! User configuration: carousel tuning, display options, slides, keybindings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/hero-carousel/config.toml` (default
//! `~/.config/hero-carousel/config.toml`).  A missing file means defaults;
//! unknown keys and unparsable values are skipped with a warning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::carousel::CarouselConfig;
use crate::core::item::Item;
use crate::core::scroll::DEFAULT_SECTIONS;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PrevItem,
    NextItem,
    JumpStart,
    JumpEnd,
    ToggleSmoothing,
    ToggleFloat,
    OpenControls,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls popup).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::PrevItem,
        Action::NextItem,
        Action::JumpStart,
        Action::JumpEnd,
        Action::ToggleSmoothing,
        Action::ToggleFloat,
        Action::OpenControls,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::PrevItem => "Previous Slide",
            Action::NextItem => "Next Slide",
            Action::JumpStart => "Jump to Start",
            Action::JumpEnd => "Jump to End",
            Action::ToggleSmoothing => "Toggle Smoothing",
            Action::ToggleFloat => "Toggle Float",
            Action::OpenControls => "Show Controls",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PrevItem => "prev_item",
            Action::NextItem => "next_item",
            Action::JumpStart => "jump_start",
            Action::JumpEnd => "jump_end",
            Action::ToggleSmoothing => "toggle_smoothing",
            Action::ToggleFloat => "toggle_float",
            Action::OpenControls => "open_controls",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Only these modifiers take part in matching.
const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code
            && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+c"`, `"PgDn"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file form (e.g. `"Down"`, `"Ctrl+c"`, `"PageDown"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, prefix) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(prefix);
            }
        }
        let name = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".into(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::PageUp, true) => "PgUp".into(),
            (KeyCode::PageDown, true) => "PgDn".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::PageUp, false) => "PageUp".into(),
            (KeyCode::PageDown, false) => "PageDown".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&name);
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Down"`, `"q"`, `"PageUp"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            // Keep the original case so `G` and `g` stay distinct.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Terminal-side presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Frame-tick rate of the render loop.
    pub fps: u32,
    /// Rows scrolled per mouse-wheel notch.
    pub wheel_rows: f64,
    /// Height of the pinned hero region, in viewports.
    pub track_viewports: f64,
    /// Large background word drawn behind the slides.
    pub headline: String,
    /// Directory the slide image names are resolved against.
    pub assets_dir: PathBuf,
    /// Idle bobbing of the character artwork.
    pub float: bool,
}

impl DisplayConfig {
    /// Accepted frame rates.  Anything outside is pulled to the nearest end.
    pub const FPS_RANGE: (u32, u32) = (10, 240);

    /// Set the frame rate, clamped to [`Self::FPS_RANGE`].
    pub fn set_fps(&mut self, fps: u32) {
        let (lo, hi) = Self::FPS_RANGE;
        self.fps = fps.clamp(lo, hi);
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            wheel_rows: 3.0,
            track_viewports: DEFAULT_SECTIONS,
            headline: "CARTOON".to_string(),
            assets_dir: PathBuf::from("assets"),
            float: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub carousel: CarouselConfig,
    pub display: DisplayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            carousel: CarouselConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n), KeyBind::new(Char(' '), shift)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(PrevItem, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(NextItem, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(JumpStart, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(JumpEnd, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), shift)]);
        m.insert(ToggleSmoothing, vec![KeyBind::new(Char('s'), n)]);
        m.insert(ToggleFloat, vec![KeyBind::new(Char('f'), n)]);
        m.insert(OpenControls, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, count)| mc > count) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Format the binding list for a given action (e.g. `"↓/j"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/wheel: scroll | {}: next slide | {}: smoothing | {}: controls | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::NextItem),
            self.short_binding(Action::ToggleSmoothing),
            self.short_binding(Action::OpenControls),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse_config(&contents)
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Persist the config to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();
        let mut items: Vec<Item> = Vec::new();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if key == "item" {
                match Item::parse_line(value) {
                    Ok(item) => items.push(item),
                    Err(e) => tracing::warn!(line = lineno + 1, error = %e, "skipping item"),
                }
                continue;
            }
            if config.apply_setting(key, value) {
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(line = lineno + 1, key, "unknown config key");
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        if !items.is_empty() {
            config.carousel.items = items;
        }
        config
    }

    /// Apply a scalar setting.  Returns `false` when `key` is not a setting.
    fn apply_setting(&mut self, key: &str, value: &str) -> bool {
        let number = || value.parse::<f64>().ok().filter(|v| v.is_finite());
        let flag = || match value {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        };
        let spring = &mut self.carousel.spring;
        let display = &mut self.display;
        let applied = match key {
            "loop_factor" => number().map(|v| self.carousel.loop_factor = v),
            "stiffness" => number().map(|v| spring.stiffness = v),
            "damping" => number().map(|v| spring.damping = v),
            "mass" => number().map(|v| spring.mass = v),
            "rest_delta" => number().map(|v| spring.rest_delta = v),
            "rest_speed" => number().map(|v| spring.rest_speed = v),
            "smoothing" => flag().map(|v| self.carousel.smoothing = v),
            "fps" => value.parse::<u32>().ok().map(|v| display.set_fps(v)),
            "wheel_rows" => number().map(|v| display.wheel_rows = v.clamp(0.5, 50.0)),
            "track_viewports" => number().map(|v| display.track_viewports = v.max(2.0)),
            "headline" => {
                display.headline = value.to_string();
                Some(())
            }
            "assets_dir" => {
                display.assets_dir = PathBuf::from(value);
                Some(())
            }
            "float" => flag().map(|v| display.float = v),
            _ => return false,
        };
        if applied.is_none() {
            tracing::warn!(key, value, "ignoring invalid value");
        }
        true
    }

    fn serialise(&self) -> String {
        let spring = &self.carousel.spring;
        let mut lines = vec![
            "# hero-carousel configuration".to_string(),
            String::new(),
            "# Carousel".to_string(),
            format!("loop_factor = {}", self.carousel.loop_factor),
            format!("smoothing = {}", self.carousel.smoothing),
            format!("stiffness = {}", spring.stiffness),
            format!("damping = {}", spring.damping),
            format!("mass = {}", spring.mass),
            format!("rest_delta = {}", spring.rest_delta),
            format!("rest_speed = {}", spring.rest_speed),
            String::new(),
            "# Display".to_string(),
            format!("fps = {}", self.display.fps),
            format!("wheel_rows = {}", self.display.wheel_rows),
            format!("track_viewports = {}", self.display.track_viewports),
            format!("headline = {}", self.display.headline),
            format!("assets_dir = {}", self.display.assets_dir.display()),
            format!("float = {}", self.display.float),
            String::new(),
            "# Slides: item = id | image | #start | #end | TITLE | description".to_string(),
        ];
        for item in &self.carousel.items {
            lines.push(format!("item = {}", item.to_line()));
        }

        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ]);
        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/hero-carousel/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}
