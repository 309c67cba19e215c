#![forbid(unsafe_code)]

//! Host orchestrator over a [`ViewArena`] and a [`Timeline`].
//!
//! `Stage` plays the part of the UI framework: it owns the window, asks the
//! installed [`TransitioningDelegate`] for a controller and animators, calls
//! the lifecycle hooks in the order a framework would, and routes taps,
//! resizes, and preferred-size changes. Time only moves in [`Stage::advance`].
//!
//! Lifecycle order for each phase:
//!
//! 1. `on_will_begin(phase)` with a [`TimelineCoordinator`] for the
//!    animator's duration;
//! 2. `animate_transition` with the controller's frame as final frame;
//! 3. ticks until the driver reports completion;
//! 4. `on_did_end(phase, finished)`, then a layout pass or teardown.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use slide_core::{
    ContentContainer, Point, PresentationLifecycle, PresentingContext, Rect, Rgba, Size,
    TransitionContext, TransitionPhase, TransitioningDelegate, ViewId, ViewTree,
};
use slide_runtime::{Subscription, Timeline, TimelineCoordinator, ViewArena};
use slide_transition::PresentedContent;
use web_time::Duration;

/// Errors from host-level requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageError {
    /// A presentation is already active.
    AlreadyPresenting,
    /// Nothing is presented.
    NothingPresented,
    /// The active presentation is mid-transition.
    TransitionInFlight(TransitionPhase),
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPresenting => write!(f, "a presentation is already active"),
            Self::NothingPresented => write!(f, "nothing is presented"),
            Self::TransitionInFlight(phase) => {
                write!(f, "a {phase} transition is still running")
            }
        }
    }
}

impl std::error::Error for StageError {}

/// Completion reported by an animator, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    pub phase: TransitionPhase,
    pub finished: bool,
}

/// The presenting side handed to controllers: queues dismiss requests.
#[derive(Debug, Default)]
struct DismissQueue {
    pending: RefCell<VecDeque<bool>>,
    received: Cell<usize>,
}

impl PresentingContext for DismissQueue {
    fn dismiss(&self, animated: bool) {
        tracing::debug!(animated, "dismiss requested");
        self.pending.borrow_mut().push_back(animated);
        self.received.set(self.received.get() + 1);
    }
}

struct ActivePresentation {
    content: PresentedContent,
    controller: Box<dyn PresentationLifecycle>,
    container: ViewId,
    in_flight: Option<TransitionPhase>,
    size_dirty: Rc<Cell<bool>>,
    _size_subscription: Subscription,
}

/// In-memory host for slide presentations.
pub struct Stage {
    views: ViewArena,
    timeline: Timeline,
    window: ViewId,
    presenting_view: ViewId,
    delegate: Rc<dyn TransitioningDelegate>,
    dismissals: Rc<DismissQueue>,
    completions: Rc<RefCell<VecDeque<TransitionRecord>>>,
    history: Vec<TransitionRecord>,
    active: Option<ActivePresentation>,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("window", &self.window)
            .field("timeline", &self.timeline)
            .field("views", &self.views.len())
            .field("presenting", &self.is_presenting())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl Stage {
    /// A window of `size` with a full-size presenting view.
    pub fn new(delegate: Rc<dyn TransitioningDelegate>, size: Size) -> Self {
        let mut views = ViewArena::new();
        let window = views.create_root(Rect::from_size(size));
        let presenting_view = views.create_view(Rgba::WHITE);
        views.add_subview(window, presenting_view);
        views.set_frame(presenting_view, Rect::from_size(size));
        Self {
            views,
            timeline: Timeline::new(),
            window,
            presenting_view,
            delegate,
            dismissals: Rc::default(),
            completions: Rc::default(),
            history: Vec::new(),
            active: None,
        }
    }

    pub fn views(&self) -> &ViewArena {
        &self.views
    }

    /// Mutable access, e.g. to create the view of content to present.
    pub fn views_mut(&mut self) -> &mut ViewArena {
        &mut self.views
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    pub fn window(&self) -> ViewId {
        self.window
    }

    #[inline]
    pub fn presenting_view(&self) -> ViewId {
        self.presenting_view
    }

    /// Create a view and wrap it as presentable content.
    pub fn make_content(&mut self, preferred_size: Size) -> PresentedContent {
        let view = self.views.create_view(Rgba::WHITE);
        PresentedContent::new(view, preferred_size)
    }

    pub fn is_presenting(&self) -> bool {
        self.active.is_some()
    }

    pub fn in_flight(&self) -> Option<TransitionPhase> {
        self.active.as_ref().and_then(|a| a.in_flight)
    }

    /// The active controller, if any.
    pub fn controller(&self) -> Option<&dyn PresentationLifecycle> {
        self.active.as_ref().map(|a| a.controller.as_ref())
    }

    /// The active session's container view, if any.
    pub fn container(&self) -> Option<ViewId> {
        self.active.as_ref().map(|a| a.container)
    }

    /// The active presented view, if any.
    pub fn presented_view(&self) -> Option<ViewId> {
        self.active.as_ref().map(|a| a.content.view())
    }

    /// Every completion the animators reported, oldest first.
    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    /// Total dismiss requests received from controllers.
    pub fn dismiss_requests(&self) -> usize {
        self.dismissals.received.get()
    }

    /// Begin presenting `content`.
    pub fn present(&mut self, content: PresentedContent) -> Result<(), StageError> {
        if self.active.is_some() {
            return Err(StageError::AlreadyPresenting);
        }

        let container = self.views.create_view(Rgba::TRANSPARENT);
        self.views.add_subview(self.window, container);
        let bounds = self.window_bounds();
        self.views.set_frame(container, bounds);

        let presenting: Rc<dyn PresentingContext> = self.dismissals.clone();
        let mut controller = self.delegate.presentation_controller(
            Rc::new(content.clone()),
            presenting,
            self.presenting_view,
        );
        controller.set_container_view(Some(container));

        let size_dirty = Rc::new(Cell::new(false));
        let dirty = Rc::clone(&size_dirty);
        let subscription = content.on_preferred_size_change(move |_| dirty.set(true));

        tracing::debug!(
            container = container.id(),
            view = content.view().id(),
            "presenting content"
        );
        self.active = Some(ActivePresentation {
            content,
            controller,
            container,
            in_flight: None,
            size_dirty,
            _size_subscription: subscription,
        });
        self.begin(TransitionPhase::Presenting);
        Ok(())
    }

    /// Begin dismissing the active presentation.
    pub fn dismiss(&mut self) -> Result<(), StageError> {
        let Some(active) = &self.active else {
            return Err(StageError::NothingPresented);
        };
        if let Some(phase) = active.in_flight {
            return Err(StageError::TransitionInFlight(phase));
        }
        self.begin(TransitionPhase::Dismissing);
        Ok(())
    }

    /// Advance time by `dt` and process whatever that produced.
    ///
    /// Returns the number of animations that completed on this tick.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let completed = self.timeline.tick(&mut self.views, dt);
        self.pump();
        completed
    }

    /// Advance in `step` increments until no animation is running.
    pub fn settle(&mut self, step: Duration) -> usize {
        let step = if step.is_zero() {
            Duration::from_millis(1)
        } else {
            step
        };
        let mut ticks = 0;
        while !self.timeline.is_idle() {
            self.advance(step);
            ticks += 1;
        }
        ticks
    }

    /// Interrupt every running animation; completions report unfinished.
    pub fn interrupt(&mut self) -> usize {
        let interrupted = self.timeline.interrupt_all();
        self.pump();
        interrupted
    }

    /// Deliver a tap at `point` in window coordinates.
    ///
    /// Returns the view whose tap handlers ran.
    pub fn tap(&mut self, point: Point) -> Option<ViewId> {
        let hit = self.views.tap(self.window, point);
        self.pump();
        hit
    }

    /// Resize the window and run a layout pass.
    pub fn resize(&mut self, size: Size) {
        let bounds = Rect::from_size(size);
        self.views.set_frame(self.window, bounds);
        self.views.set_frame(self.presenting_view, bounds);
        if let Some(active) = &mut self.active {
            self.views.set_frame(active.container, bounds);
            tracing::debug!(?size, "window resized");
            active.controller.on_layout_invalidated(&mut self.views);
        }
    }

    /// Forward pending preferred-size changes, completions, and dismiss
    /// requests.
    pub fn pump(&mut self) {
        self.flush_preferred_size();
        self.drain_completions();
        self.drain_dismissals();
    }

    fn window_bounds(&self) -> Rect {
        self.views.bounds(self.window).unwrap_or(Rect::ZERO)
    }

    fn flush_preferred_size(&mut self) {
        if let Some(active) = &mut self.active {
            if active.size_dirty.replace(false) {
                active.controller.on_preferred_size_changed(&mut self.views);
            }
        }
    }

    fn begin(&mut self, phase: TransitionPhase) {
        let Some(active) = &mut self.active else {
            return;
        };
        let animator = match phase {
            TransitionPhase::Presenting => self.delegate.animator_for_presentation(),
            TransitionPhase::Dismissing => self.delegate.animator_for_dismissal(),
        };
        let duration = animator.transition_duration();
        {
            let mut coordinator = TimelineCoordinator::new(&mut self.timeline, duration);
            active
                .controller
                .on_will_begin(phase, &mut self.views, Some(&mut coordinator));
        }

        let presented = active.content.view();
        let final_frame = active
            .controller
            .on_frame_query(&self.views)
            .unwrap_or(Rect::ZERO);
        let (from, to) = match phase {
            TransitionPhase::Presenting => (self.presenting_view, presented),
            TransitionPhase::Dismissing => (presented, self.presenting_view),
        };
        let completions = Rc::clone(&self.completions);
        let ctx = TransitionContext::new(active.container, from, to, move |finished| {
            completions
                .borrow_mut()
                .push_back(TransitionRecord { phase, finished });
        })
        .with_final_frame(presented, final_frame);

        active.in_flight = Some(phase);
        tracing::debug!(
            %phase,
            ?duration,
            at = ?self.timeline.now(),
            running = self.timeline.running_count(),
            "transition started"
        );
        animator.animate_transition(ctx, &mut self.views, &mut self.timeline);
    }

    fn drain_completions(&mut self) {
        loop {
            let Some(record) = self.completions.borrow_mut().pop_front() else {
                break;
            };
            self.history.push(record);
            let Some(active) = &mut self.active else {
                tracing::warn!(?record, "completion without an active presentation");
                continue;
            };
            active.in_flight = None;
            active
                .controller
                .on_did_end(record.phase, record.finished, &mut self.views);

            let ended = match record.phase {
                TransitionPhase::Presenting => !record.finished,
                TransitionPhase::Dismissing => record.finished,
            };
            if ended {
                self.end_session();
            } else if let Some(active) = &mut self.active {
                active.controller.on_layout_invalidated(&mut self.views);
            }
        }
    }

    fn drain_dismissals(&mut self) {
        loop {
            let Some(animated) = self.dismissals.pending.borrow_mut().pop_front() else {
                break;
            };
            match self.dismiss() {
                Ok(()) => tracing::debug!(animated, "dismissal started"),
                Err(err) => tracing::warn!(%err, "dismiss request dropped"),
            }
        }
    }

    fn end_session(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        active.controller.set_container_view(None);
        self.views.remove_from_superview(active.content.view());
        self.views.remove_view(active.container);
        tracing::debug!(container = active.container.id(), "presentation torn down");
    }
}
