//! Background threads that swap the renderer's source on their own schedule.

use std::f32::consts::TAU;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use glam::Vec2;
use tinct_engine::paint::Color;

/// Endless sequence of unit vectors, starting at `(1, 0)` and turning
/// counter-clockwise by `step` radians each time.
#[derive(Debug, Clone)]
pub struct Windmill {
    vector: Vec2,
    rotor: Vec2,
}

impl Windmill {
    pub fn new(step: f32) -> Self {
        Self {
            vector: Vec2::X,
            rotor: Vec2::from_angle(step),
        }
    }
}

impl Iterator for Windmill {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        let current = self.vector;
        self.vector = self.rotor.rotate(current);
        Some(current)
    }
}

/// Maps a unit vector at angle θ to a color with three lobes 120° apart:
/// red peaks at θ = 0, green at θ = -120°, blue at θ = +120°.
pub fn hue_wheel(v: Vec2) -> Color {
    let third = TAU / 3.0;
    let green = Vec2::from_angle(third).rotate(v);
    let blue = Vec2::from_angle(-third).rotate(v);
    Color::rgb(v.x.max(0.0), green.x.max(0.0), blue.x.max(0.0))
}

/// Thread walking the hue wheel one step per tick.
///
/// Dropping the value stops the thread and waits for it, so nothing it publishes
/// can land after the drop returns.
pub struct ColorCycle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl ColorCycle {
    /// Starts the thread. `publish` runs on it once per tick, the first time
    /// immediately.
    pub fn spawn<F>(tick: Duration, step: f32, mut publish: F) -> Result<Self>
    where
        F: FnMut(Color) + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let thread = std::thread::Builder::new()
            .name("tinct color cycle".into())
            .spawn(move || {
                log::debug!("color cycle started ({tick:?} per step)");
                for v in Windmill::new(step) {
                    publish(hue_wheel(v));
                    match stop_rx.recv_timeout(tick) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::debug!("color cycle stopped");
            })
            .context("failed to spawn color cycle thread")?;

        Ok(Self {
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }
}

impl Drop for ColorCycle {
    fn drop(&mut self) {
        // Closing the channel wakes the thread out of its sleep.
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("color cycle thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── windmill ──────────────────────────────────────────────────────────

    #[test]
    fn windmill_starts_on_x_axis() {
        let first = Windmill::new(0.3).next().unwrap();
        assert_eq!(first, Vec2::X);
    }

    #[test]
    fn ninety_degree_steps_reach_y_axis() {
        let v = Windmill::new(1.0_f32.to_radians()).nth(90).unwrap();
        assert!(close(v.x, 0.0), "{v}");
        assert!(close(v.y, 1.0), "{v}");
    }

    #[test]
    fn vectors_stay_unit_length() {
        for v in Windmill::new(0.01).take(1000) {
            assert!(close(v.length(), 1.0));
        }
    }

    // ── hue wheel ─────────────────────────────────────────────────────────

    #[test]
    fn zero_angle_is_pure_red() {
        let c = hue_wheel(Vec2::X);
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 0.0));
        assert!(close(c.b, 0.0));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn lobes_are_a_third_of_a_turn_apart() {
        let green = hue_wheel(Vec2::from_angle(-TAU / 3.0));
        assert!(close(green.g, 1.0) && close(green.r, 0.0) && close(green.b, 0.0));

        let blue = hue_wheel(Vec2::from_angle(TAU / 3.0));
        assert!(close(blue.b, 1.0) && close(blue.r, 0.0) && close(blue.g, 0.0));
    }

    #[test]
    fn halfway_between_lobes_mixes_both() {
        let c = hue_wheel(Vec2::from_angle(-TAU / 6.0));
        assert!(close(c.r, 0.5));
        assert!(close(c.g, 0.5));
        assert!(close(c.b, 0.0));
    }

    // ── thread ────────────────────────────────────────────────────────────

    #[test]
    fn cycle_publishes_until_dropped() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let cycle = ColorCycle::spawn(Duration::from_millis(1), 0.1, move |c| {
            let _ = tx.send(c);
        })
        .unwrap();

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(close(first.r, 1.0));
        rx.recv_timeout(Duration::from_secs(5)).unwrap();

        drop(cycle);
        while rx.try_recv().is_ok() {}
        // The sender lived on the joined thread, so the channel is closed now.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn long_tick_does_not_delay_stop() {
        let cycle = ColorCycle::spawn(Duration::from_secs(3600), 0.1, |_| {}).unwrap();
        let started = std::time::Instant::now();
        drop(cycle);
        assert!(started.elapsed() < Duration::from_secs(60));
    }
}
