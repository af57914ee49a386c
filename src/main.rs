//! A scroll-driven hero carousel for the terminal.
//!
//! Run the binary to launch the interactive stage; scroll with the mouse
//! wheel or the keys listed under `?`.  Run with `--dump FRAMES` to print a
//! headless sweep of the whole scroll range instead.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use tokio::sync::mpsc;

use crate::app::{
    dump,
    event::{spawn_event_reader, AppEvent},
    handler,
    image_runtime::{spawn_image_loads, ImageUpdate},
    state::{ActiveView, AppState},
    ticker::FrameTicker,
};
use crate::config::AppConfig;
use crate::core::carousel::{Carousel, Frame};
use crate::ui::{
    caption::CaptionWidget, indicator::IndicatorWidget, layout::AppLayout, popup,
    stage::StageWidget, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven hero carousel")]
struct Cli {
    /// Config file to read (and write with `--write-config`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the slide images are loaded from.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// How many times the catalogue cycles over the full scroll range.
    #[arg(long = "loop-factor")]
    loop_factor: Option<f64>,

    /// Frame rate of the render loop.
    #[arg(long)]
    fps: Option<u32>,

    /// Follow the scroll position directly instead of through the spring.
    #[arg(long = "no-spring")]
    no_spring: bool,

    /// Disable the idle float of the artwork.
    #[arg(long = "no-float")]
    no_float: bool,

    /// Print a headless sweep of FRAMES frames to stdout and exit.
    #[arg(long, value_name = "FRAMES")]
    dump: Option<usize>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.assets {
            config.display.assets_dir = dir.clone();
        }
        if let Some(loop_factor) = self.loop_factor {
            config.carousel.loop_factor = loop_factor;
        }
        if let Some(fps) = self.fps {
            config.display.set_fps(fps);
        }
        if self.no_spring {
            config.carousel.smoothing = false;
        }
        if self.no_float {
            config.display.float = false;
        }
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(f: &mut ratatui::Frame, state: &AppState) {
    let layout = AppLayout::from_area(f.area());
    let snapshot = state.carousel.frame();
    let items = state.carousel.items();
    let artwork = state.artwork();

    f.render_widget(
        StageWidget {
            frame: &snapshot,
            items,
            artwork: &artwork,
            headline: &state.config.display.headline,
            float: state.float,
            elapsed: state.elapsed,
        },
        layout.stage_area,
    );
    f.render_widget(
        CaptionWidget {
            frame: &snapshot,
            items,
        },
        layout.stage_area,
    );
    f.render_widget(IndicatorWidget { frame: &snapshot }, layout.stage_area);

    let status = Paragraph::new(status_line(state, &snapshot)).style(Theme::status_bar_style());
    f.render_widget(status, layout.status_area);

    if state.active_view == ActiveView::Controls {
        f.render_widget(
            popup::ControlsPopup {
                config: &state.config,
            },
            f.area(),
        );
    }
}

fn status_line(state: &AppState, snapshot: &Frame) -> Line<'static> {
    let title = state
        .carousel
        .items()
        .get(snapshot.active)
        .map_or("", |item| item.title.as_str());
    let position = format!(
        " {:5.1}%  #{:.2} → {:.2}  {} ",
        snapshot.progress * 100.0,
        snapshot.smoothed_index,
        snapshot.virtual_index,
        title
    );

    let hint = state.config.status_bar_hint();
    let tail = match state.active_view {
        ActiveView::Stage => state.status_message.clone().unwrap_or(hint),
        ActiveView::Controls => String::new(),
    };
    let mode = if state.carousel.smoothing() { "spring" } else { "direct" };

    Line::from(vec![
        Span::styled(position, Theme::status_accent_style()),
        Span::raw(format!(" {mode} | {tail}")),
    ])
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // stdout belongs to --dump
        .init();

    let cli = Cli::parse();

    // ── configuration ─────────────────────────────────────────
    let mut user_config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    cli.apply(&mut user_config);

    if cli.write_config {
        let path = cli.config.clone().unwrap_or_else(config::config_path);
        user_config
            .save_to(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mut carousel =
        Carousel::new(user_config.carousel.clone()).context("invalid carousel configuration")?;

    // ── headless mode ─────────────────────────────────────────
    if let Some(frames) = cli.dump {
        let mut out = io::stdout().lock();
        return dump::run(&mut carousel, frames, user_config.display.fps, &mut out);
    }

    // ── terminal setup ────────────────────────────────────────
    let (width, height) = crossterm::terminal::size()?;
    let stage_rows = AppLayout::from_area(Rect::new(0, 0, width, height))
        .stage_area
        .height;
    let mut state = AppState::new(carousel, user_config, stage_rows);

    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(50));
    let (image_tx, mut image_rx) = mpsc::unbounded_channel::<ImageUpdate>();
    spawn_image_loads(image_tx, state.artwork_paths());

    let mut ticker = FrameTicker::new(state.config.display.fps);
    tracing::debug!(period = ?ticker.period(), "frame loop starting");

    // ── event loop ────────────────────────────────────────────
    let mut needs_draw = true;
    loop {
        if needs_draw {
            terminal.draw(|f| draw(f, state))?;
            needs_draw = false;
        }

        tokio::select! {
            Some(event) = events.recv() => {
                needs_draw = true;
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => handler::handle_resize(state, w, h),
                }
            }

            dt = ticker.tick() => {
                // A settled stage with no float has nothing new to show.
                needs_draw |= !state.carousel.is_resting() || state.float.is_some();
                state.tick(dt);
            }

            Some(update) = image_rx.recv() => {
                needs_draw = true;
                match update.result {
                    Ok(img) => {
                        tracing::debug!(path = %update.path.display(), "artwork loaded");
                        state.images.insert(update.path, img);
                    }
                    Err(e) => {
                        tracing::warn!(error = %format!("{e:#}"), "artwork failed to load");
                        state.status_message = Some(format!("Artwork: {e:#}"));
                    }
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // Closing the receiver stops the input reader; the ticker goes with it.
    drop(events);
    drop(ticker);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_fps_obeys_the_config_bounds() {
        let mut config = AppConfig::default();
        Cli::parse_from(["hero-carousel", "--fps", "1000"]).apply(&mut config);
        assert_eq!(config.display.fps, 240);

        Cli::parse_from(["hero-carousel", "--fps", "1"]).apply(&mut config);
        assert_eq!(config.display.fps, 10);

        Cli::parse_from(["hero-carousel", "--fps", "30"]).apply(&mut config);
        assert_eq!(config.display.fps, 30);
    }
}
