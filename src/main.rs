//! Headless driver for the dot field
//!
//! Run with: cargo run --features cli --bin dot-field-cli
//!
//! Environment:
//! - `DOT_FIELD_CONFIG`: JSON file overriding tuning constants
//! - `DOT_FIELD_SIZE`: viewport as `WIDTHxHEIGHT`, each side at most 16384
//!   (default `800x600`)
//! - `DOT_FIELD_FRAMES`: frames to run, `0` runs until Ctrl-C (default 600,
//!   also used when the value does not parse)
//! - `DOT_FIELD_COLOR`: dot color handed to the field (default `#bbb`)
//! - `DOT_FIELD_REDUCED_MOTION`: `1` mounts the field disabled
//! - `DOT_FIELD_ASCII`: `1` prints the final frame as text

use std::error::Error;

use dot_field::ascii::AsciiSurface;
use dot_field::core::{Controller, FieldParams, Host, Viewport};

const DEFAULT_SIZE: (f64, f64) = (800.0, 600.0);
const DEFAULT_FRAMES: u64 = 600;
/// Largest accepted viewport side, in logical pixels
const MAX_EXTENT: f64 = 16_384.0;
const FRAME_MS: u64 = 16;
/// Frames per scripted sweep of the cursor across the field
const SWEEP_FRAMES: u64 = 240;
const CLICK_EVERY: u64 = 120;

/// Host backed by a character grid, with the frame loop driven by `main`.
struct CliHost {
    viewport: Viewport,
    reduced_motion: bool,
    surface: AsciiSurface,
    frame_pending: bool,
    listening: bool,
}

impl Host for CliHost {
    type Surface = AsciiSurface;

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn surface(&mut self) -> Option<&mut AsciiSurface> {
        Some(&mut self.surface)
    }

    fn fit_viewport(&mut self) -> Option<Viewport> {
        Some(self.viewport)
    }

    fn dot_color(&self) -> Option<String> {
        std::env::var("DOT_FIELD_COLOR").ok()
    }

    fn attach_listeners(&mut self) {
        self.listening = true;
    }

    fn detach_listeners(&mut self) {
        self.listening = false;
    }

    fn request_frame(&mut self) {
        self.frame_pending = true;
    }

    fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }
}

/// Parse `WIDTHxHEIGHT`
fn parse_size(text: &str) -> Result<(f64, f64), String> {
    let (w, h) = text
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {text:?}"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0 && *v <= MAX_EXTENT)
            .ok_or_else(|| {
                format!("invalid dimension {s:?} in {text:?} (expected 0 < side <= {MAX_EXTENT})")
            })
    };
    Ok((parse(w)?, parse(h)?))
}

/// Frame budget; unparseable values fall back to [`DEFAULT_FRAMES`].
fn parse_frames(text: &str) -> u64 {
    match text.trim().parse::<u64>() {
        Ok(frames) => frames,
        Err(e) => {
            tracing::warn!(value = text, error = %e, default = DEFAULT_FRAMES, "Bad DOT_FIELD_FRAMES");
            DEFAULT_FRAMES
        }
    }
}

fn parse_flag(text: &str) -> bool {
    matches!(text.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Scripted cursor: a wavy left-to-right sweep, off the page for the last
/// quarter of each sweep.
fn cursor_at(frame: u64, width: f64, height: f64) -> Option<(f64, f64)> {
    let phase = (frame % SWEEP_FRAMES) as f64 / SWEEP_FRAMES as f64;
    if phase >= 0.75 {
        return None;
    }
    let t = phase / 0.75;
    let x = t * width;
    let y = height / 2.0 + (t * std::f64::consts::TAU).sin() * height / 4.0;
    Some((x, y))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    use dot_field::stats::FrameRate;
    use tracing::{debug, info};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dot_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let params = match std::env::var("DOT_FIELD_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading params");
            FieldParams::load(&path)?
        }
        Err(_) => FieldParams::default(),
    };
    let (width, height) = match std::env::var("DOT_FIELD_SIZE") {
        Ok(size) => parse_size(&size)?,
        Err(_) => DEFAULT_SIZE,
    };
    let max_frames = match std::env::var("DOT_FIELD_FRAMES") {
        Ok(frames) => parse_frames(&frames),
        Err(_) => DEFAULT_FRAMES,
    };
    let reduced_motion = std::env::var("DOT_FIELD_REDUCED_MOTION").is_ok_and(|v| parse_flag(&v));
    let print_ascii = std::env::var("DOT_FIELD_ASCII").is_ok_and(|v| parse_flag(&v));

    let host = CliHost {
        viewport: Viewport::new(width, height, 1.0),
        reduced_motion,
        surface: AsciiSurface::new(params.spacing / 2.0, params.spacing),
        frame_pending: false,
        listening: false,
    };
    let mut ctrl = Controller::mount(host, params);
    info!(state = %ctrl.state(), width, height, max_frames, "Field ready");

    let mut frame_rate = FrameRate::new();
    let mut frame_interval = tokio::time::interval(std::time::Duration::from_millis(FRAME_MS));
    let mut stats_interval = tokio::time::interval(std::time::Duration::from_secs(1));
    let mut frame = 0u64;

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                if !ctrl.host().frame_pending {
                    break;
                }
                ctrl.host_mut().frame_pending = false;

                if ctrl.host().listening {
                    match cursor_at(frame, width, height) {
                        Some((x, y)) => {
                            ctrl.on_pointer_move(x, y);
                            if frame % CLICK_EVERY == CLICK_EVERY / 2 {
                                debug!(x, y, frame, "Click");
                                ctrl.on_pointer_down(x, y);
                            }
                        }
                        None => ctrl.on_pointer_leave(),
                    }
                }

                ctrl.on_frame();
                frame_rate.tick();
                frame += 1;
                if max_frames > 0 && frame >= max_frames {
                    break;
                }
            }
            _ = stats_interval.tick() => {
                if let Some(field) = ctrl.field() {
                    let m = field.metrics();
                    info!(
                        frame = m.frame,
                        fps = format!("{:.1}", frame_rate.fps()),
                        energy = format!("{:.3}", m.kinetic_energy),
                        max_displacement = format!("{:.2}", m.max_displacement),
                        pulse = format!("{:.3}", m.pulse_strength),
                        "stats"
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    let summary = ctrl.field().map(|field| field.metrics());
    if print_ascii && ctrl.state().is_running() {
        print!("{}", ctrl.host().surface);
    }
    ctrl.unmount();

    match summary {
        Some(metrics) => println!("{}", serde_json::to_string(&metrics)?),
        None => info!("Field never ran"),
    }
    Ok(())
}
