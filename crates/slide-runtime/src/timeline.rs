#![forbid(unsafe_code)]

//! Tick-driven animation driver.
//!
//! [`Timeline`] implements [`AnimationDriver`] without a clock of its own:
//! the host loop calls [`Timeline::tick`] with the elapsed time, and every
//! running animation writes its interpolated values into the view tree.
//!
//! # Invariants
//!
//! - Start values are captured when an animation is scheduled, never later.
//!   A container resize mid-flight does not re-target running animations.
//! - Each completion fires exactly once: `true` when the animation reaches
//!   its end on a tick, `false` when it is interrupted.
//! - Completions never run inside [`AnimationDriver::animate`]; a zero
//!   duration animation completes on the next tick.
//! - Animations scheduled in the same turn with the same duration finish on
//!   the same tick.

use slide_core::geometry::lerp;
use slide_core::{
    AnimatedProperty, Animation, AnimationCurve, AnimationDriver, Completion, Rect, ViewId,
    ViewTree,
};
use web_time::Duration;

/// Identifier of a scheduled animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

impl AnimationId {
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
enum Track {
    Frame { view: ViewId, from: Rect, to: Rect },
    Alpha { view: ViewId, from: f64, to: f64 },
}

impl Track {
    fn apply(&self, views: &mut dyn ViewTree, t: f64) {
        match *self {
            Self::Frame { view, from, to } => views.set_frame(view, from.lerp(to, t)),
            Self::Alpha { view, from, to } => views.set_alpha(view, lerp(from, to, t)),
        }
    }
}

struct RunningAnimation {
    id: AnimationId,
    started: Duration,
    duration: Duration,
    curve: AnimationCurve,
    tracks: Vec<Track>,
    completion: Option<Completion>,
}

impl RunningAnimation {
    fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Host-ticked animation timeline.
#[derive(Default)]
pub struct Timeline {
    now: Duration,
    next_id: u64,
    running: Vec<RunningAnimation>,
    last_scheduled: Option<AnimationId>,
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("now", &self.now)
            .field("running", &self.running.len())
            .finish()
    }
}

impl Timeline {
    /// Create an idle timeline at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed across all ticks.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    #[inline]
    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// The most recently scheduled animation, if any.
    pub fn last_scheduled(&self) -> Option<AnimationId> {
        self.last_scheduled
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.running.iter().any(|a| a.id == id)
    }

    /// Advance by `dt`, apply interpolated values, and complete animations
    /// that reached their end. Returns how many completed.
    pub fn tick(&mut self, views: &mut dyn ViewTree, dt: Duration) -> usize {
        self.now += dt;
        let now = self.now;

        for anim in &self.running {
            let t = anim.curve.apply(anim.progress(now));
            for track in &anim.tracks {
                track.apply(views, t);
            }
        }

        let (done, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.running)
            .into_iter()
            .partition(|a| a.progress(now) >= 1.0);
        self.running = running;

        let count = done.len();
        for mut anim in done {
            tracing::trace!(animation = anim.id.0, "animation finished");
            if let Some(completion) = anim.completion.take() {
                completion(true);
            }
        }
        count
    }

    /// Tick until idle, in steps of `step`. Returns the number of ticks.
    pub fn settle(&mut self, views: &mut dyn ViewTree, step: Duration) -> usize {
        let step = if step.is_zero() {
            Duration::from_millis(1)
        } else {
            step
        };
        let mut ticks = 0;
        while !self.is_idle() {
            self.tick(views, step);
            ticks += 1;
        }
        ticks
    }

    /// Stop one animation where it is; its completion reports `false`.
    pub fn interrupt(&mut self, id: AnimationId) -> bool {
        let Some(idx) = self.running.iter().position(|a| a.id == id) else {
            return false;
        };
        let mut anim = self.running.remove(idx);
        tracing::debug!(animation = id.0, "animation interrupted");
        if let Some(completion) = anim.completion.take() {
            completion(false);
        }
        true
    }

    /// Stop every running animation where it is. Returns how many stopped.
    pub fn interrupt_all(&mut self) -> usize {
        let interrupted = std::mem::take(&mut self.running);
        let count = interrupted.len();
        if count > 0 {
            tracing::debug!(count, "interrupting all animations");
        }
        for mut anim in interrupted {
            if let Some(completion) = anim.completion.take() {
                completion(false);
            }
        }
        count
    }
}

impl AnimationDriver for Timeline {
    fn animate(&mut self, views: &mut dyn ViewTree, animation: Animation, completion: Completion) {
        let tracks: Vec<Track> = animation
            .changes
            .iter()
            .filter_map(|change| match change.target {
                AnimatedProperty::Frame(to) => views.frame(change.view).map(|from| Track::Frame {
                    view: change.view,
                    from,
                    to,
                }),
                AnimatedProperty::Alpha(to) => views.alpha(change.view).map(|from| Track::Alpha {
                    view: change.view,
                    from,
                    to,
                }),
            })
            .collect();

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        tracing::trace!(
            animation = id.0,
            duration_ms = animation.duration.as_millis() as u64,
            tracks = tracks.len(),
            "animation scheduled"
        );
        self.running.push(RunningAnimation {
            id,
            started: self.now,
            duration: animation.duration,
            curve: animation.curve,
            tracks,
            completion: Some(completion),
        });
        self.last_scheduled = Some(id);
    }
}
