//! Fixed-step frame loop for headless runs.

use anyhow::{bail, Result};
use folio_core::Millis;

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
    /// Upper bound on frames a single step may run.
    pub max_frames: u32,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            max_frames: 100_000,
        }
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// Logical time of this frame
    pub now_ms: Millis,
}

pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run `frames` frames starting one tick after `start_ms`. The last
    /// frame lands exactly on `start_ms + span_ms`.
    pub fn run<F>(
        cfg: HeadlessRunConfig,
        start_ms: Millis,
        span_ms: u64,
        frames: u32,
        mut on_frame: F,
    ) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        if frames > cfg.max_frames {
            bail!("step needs {frames} frames, limit is {}", cfg.max_frames);
        }

        for frame in 0..frames {
            let offset = cfg.tick_ms.saturating_mul(frame as u64 + 1).min(span_ms);
            on_frame(&HeadlessContext {
                frame_index: frame,
                now_ms: start_ms.saturating_add(offset),
            });
        }
        Ok(())
    }
}

/// Frames needed to cover `wait_ms`
pub fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_frames_rounds_up() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(17, 16), 2);
        assert_eq!(wait_frames(5_000, 16), 313);
    }

    #[test]
    fn test_last_frame_lands_on_span() {
        let mut times = Vec::new();
        HeadlessRuntime::run(HeadlessRunConfig::default(), 100, 40, 3, |ctx| {
            times.push(ctx.now_ms)
        })
        .unwrap();
        assert_eq!(times, vec![116, 132, 140]);
    }

    #[test]
    fn test_rejects_zero_tick() {
        let cfg = HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(HeadlessRuntime::run(cfg, 0, 0, 1, |_| {}).is_err());
    }
}
