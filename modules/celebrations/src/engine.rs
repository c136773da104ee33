//! The celebration engine: owns the particle simulation, advances it on a
//! fixed cadence and broadcasts every frame.
//!
//! The frame loop is lazy. It runs only while particles are active: the
//! first `celebrate()` on an idle engine spawns the loop task, the loop
//! stops itself once the simulation drains, and a later `celebrate()`
//! starts a fresh one. An idle server therefore burns no timer wakeups.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use confetti::{BurstSpec, Simulation};

use crate::config::CelebrationsConfig;
use crate::frame::{CelebrationFrame, FrameParticle};
use crate::sse::SseBroadcaster;

/// What prompted the celebration; scales the burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// One item was checked off.
    ItemChecked,
    /// The whole bought pile was cleared; bigger burst.
    ListCleared,
}

/// Everything the loop and `celebrate()` contend over, behind one lock so a
/// burst can never interleave with a half-finished step.
struct EngineState {
    sim: Simulation,
    rng: StdRng,
    seq: u64,
    loop_running: bool,
}

pub struct CelebrationEngine {
    state: Mutex<EngineState>,
    frames: SseBroadcaster<CelebrationFrame>,
    config: CelebrationsConfig,
}

impl CelebrationEngine {
    pub fn new(config: CelebrationsConfig) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(EngineState {
                sim: Simulation::new(),
                rng: StdRng::from_os_rng(),
                seq: 0,
                loop_running: false,
            }),
            frames: SseBroadcaster::new(config.channel_capacity),
            config,
        })
    }

    /// Broadcaster carrying the frame stream; subscribe here for SSE.
    pub fn frames(&self) -> &SseBroadcaster<CelebrationFrame> {
        &self.frames
    }

    /// True when no particles are active and no loop is scheduled.
    pub fn is_idle(&self) -> bool {
        let state = self.state.lock();
        state.sim.is_idle() && !state.loop_running
    }

    /// Spawn one burst and make sure the frame loop is running.
    ///
    /// Must be called from within a Tokio runtime; the loop is a spawned
    /// task. Safe to call concurrently: a burst that lands while a loop is
    /// already draining simply joins the active set.
    pub fn celebrate(self: &Arc<Self>, trigger: Trigger) {
        let start_loop = {
            let mut guard = self.state.lock();
            let state = &mut *guard;

            let (lo, hi) = self.burst_range(trigger);
            let spec = BurstSpec {
                count: state.rng.random_range(lo..=hi),
                emoji_ratio: self.config.emoji_ratio,
                ..BurstSpec::default()
            };
            state.sim.spawn_burst(&mut state.rng, &spec);
            info!(particles = spec.count, ?trigger, "Celebration burst");

            if state.loop_running {
                false
            } else {
                state.loop_running = true;
                true
            }
        };

        if start_loop {
            let engine = Arc::clone(self);
            tokio::spawn(engine.run_frame_loop());
        }
    }

    fn burst_range(&self, trigger: Trigger) -> (usize, usize) {
        let lo = self.config.burst_min.min(self.config.burst_max);
        let hi = self.config.burst_max.max(self.config.burst_min);
        match trigger {
            Trigger::ItemChecked => (lo, hi),
            Trigger::ListCleared => (hi, hi.saturating_mul(2)),
        }
    }

    /// Step-and-broadcast until the simulation drains.
    ///
    /// The idle check and the `loop_running` reset happen under the same
    /// lock acquisition as the step, so a concurrent `celebrate()` either
    /// feeds particles into this loop or observes it already gone and
    /// starts the next one. The final frame of a celebration is always the
    /// empty one, which tells painters to clear their canvas.
    async fn run_frame_loop(self: Arc<Self>) {
        debug!("Frame loop started");
        let mut ticker = tokio::time::interval(Duration::from_millis(self.config.frame_ms));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let frame = {
                let mut guard = self.state.lock();
                let state = &mut *guard;
                state.sim.step();
                state.seq += 1;
                let frame = CelebrationFrame {
                    seq: state.seq,
                    particles: state.sim.active().iter().map(FrameParticle::from).collect(),
                };
                if state.sim.is_idle() {
                    state.loop_running = false;
                }
                frame
            };

            let drained = frame.particles.is_empty();
            self.frames.send(frame);
            if drained {
                break;
            }
        }
        debug!("Frame loop drained");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio::time::timeout;

    fn test_config() -> CelebrationsConfig {
        CelebrationsConfig {
            frame_ms: 5,
            ..CelebrationsConfig::default()
        }
    }

    async fn next_frame(
        stream: &mut std::pin::Pin<Box<dyn futures::Stream<Item = CelebrationFrame> + Send>>,
    ) -> CelebrationFrame {
        timeout(Duration::from_secs(60), stream.next())
            .await
            .expect("frame loop stalled")
            .expect("frame channel closed")
    }

    fn subscribe(
        engine: &CelebrationEngine,
    ) -> std::pin::Pin<Box<dyn futures::Stream<Item = CelebrationFrame> + Send>> {
        Box::pin(engine.frames().subscribe_stream())
    }

    #[tokio::test(start_paused = true)]
    async fn burst_streams_frames_until_the_empty_one() {
        let engine = CelebrationEngine::new(test_config());
        let mut frames = subscribe(&engine);

        engine.celebrate(Trigger::ItemChecked);

        let first = next_frame(&mut frames).await;
        assert!(!first.particles.is_empty());

        let mut prev_len = first.particles.len();
        let mut prev_seq = first.seq;
        loop {
            let frame = next_frame(&mut frames).await;
            assert!(frame.seq > prev_seq);
            assert!(
                frame.particles.len() <= prev_len,
                "active set grew without a new burst"
            );
            prev_seq = frame.seq;
            prev_len = frame.particles.len();
            if frame.particles.is_empty() {
                break;
            }
        }

        assert!(engine.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn a_later_trigger_restarts_the_loop() {
        let engine = CelebrationEngine::new(test_config());
        let mut frames = subscribe(&engine);

        engine.celebrate(Trigger::ItemChecked);
        while !next_frame(&mut frames).await.particles.is_empty() {}
        assert!(engine.is_idle());

        engine.celebrate(Trigger::ItemChecked);
        let frame = next_frame(&mut frames).await;
        assert!(!frame.particles.is_empty());
        while !next_frame(&mut frames).await.particles.is_empty() {}
    }

    #[tokio::test(start_paused = true)]
    async fn a_burst_mid_flight_joins_the_running_loop() {
        let engine = CelebrationEngine::new(test_config());
        let mut frames = subscribe(&engine);

        engine.celebrate(Trigger::ItemChecked);
        let first = next_frame(&mut frames).await;
        assert!(!first.particles.is_empty());

        // Second burst while the loop is draining; the stream must still
        // terminate with an empty frame.
        engine.celebrate(Trigger::ListCleared);
        let mut saw_growth = false;
        let mut prev_len = first.particles.len();
        loop {
            let frame = next_frame(&mut frames).await;
            if frame.particles.len() > prev_len {
                saw_growth = true;
            }
            prev_len = frame.particles.len();
            if frame.particles.is_empty() {
                break;
            }
        }
        assert!(saw_growth, "second burst never showed up in the stream");
        assert!(engine.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn runs_to_completion_without_subscribers() {
        let engine = CelebrationEngine::new(test_config());
        engine.celebrate(Trigger::ItemChecked);
        assert!(!engine.is_idle());

        while !engine.is_idle() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cleared_list_bursts_bigger_than_a_single_check() {
        let config = CelebrationsConfig {
            frame_ms: 5,
            burst_min: 10,
            burst_max: 20,
            ..CelebrationsConfig::default()
        };
        let engine = CelebrationEngine::new(config);
        let mut frames = subscribe(&engine);

        engine.celebrate(Trigger::ListCleared);
        let first = next_frame(&mut frames).await;
        // ListCleared samples from burst_max..=2*burst_max; nothing expires
        // on the very first step, so the full burst is visible.
        assert!(
            first.particles.len() >= 20,
            "burst too small: {}",
            first.particles.len()
        );
        while !next_frame(&mut frames).await.particles.is_empty() {}
    }
}
