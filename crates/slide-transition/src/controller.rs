#![forbid(unsafe_code)]

//! Presentation controller: sizing policy, overlay lifecycle, and
//! dismiss-on-tap for one presentation session.
//!
//! # Invariants
//!
//! - At most one [`DimmingOverlay`] exists per session. It is created on
//!   `on_will_begin(Presenting)`, sits at index 0 of the container, and is
//!   destroyed when the session reaches `Dismissed`.
//! - Overlay alpha rests at 1 in `Presented` and is driven to 0 on
//!   dismissal; it is never left at an intermediate value once a transition
//!   has ended.
//! - The presented frame is recomputed on every layout pass and frame query.
//! - A session issues at most one dismissal request per presented period.
//!
//! # Failure Modes
//!
//! - No container attached: layout, frame queries, and overlay work are
//!   skipped and logged at `warn`. A transition that begins without a
//!   container does not advance the session state.
//! - Out-of-sequence lifecycle events are logged and ignored.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slide_core::{
    ContentContainer, PresentationLifecycle, PresentingContext, Rect, SlideDirection,
    TransitionCoordinator, TransitionPhase, ViewId, ViewTree,
};

use crate::layout::presented_frame;
use crate::overlay::{BackdropConfig, DimmingOverlay};
use crate::session::{PresentationState, SessionEvent, SessionId};

/// State shared with the overlay tap callback.
#[derive(Debug, Default)]
struct SessionShared {
    state: PresentationState,
    dismiss_requested: bool,
}

/// Controls layout and the dimming overlay of one slide-over presentation.
pub struct SlidingPresentationController {
    id: SessionId,
    direction: SlideDirection,
    backdrop: BackdropConfig,
    presented: Rc<dyn ContentContainer>,
    presenting: Rc<dyn PresentingContext>,
    container: Option<ViewId>,
    overlay: Option<DimmingOverlay>,
    shared: Rc<RefCell<SessionShared>>,
}

impl std::fmt::Debug for SlidingPresentationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingPresentationController")
            .field("id", &self.id)
            .field("direction", &self.direction)
            .field("container", &self.container)
            .field("overlay", &self.overlay)
            .field("state", &self.state())
            .finish()
    }
}

impl SlidingPresentationController {
    pub fn new(
        presented: Rc<dyn ContentContainer>,
        presenting: Rc<dyn PresentingContext>,
        direction: SlideDirection,
        backdrop: BackdropConfig,
    ) -> Self {
        let id = SessionId::next();
        tracing::debug!(session = %id, %direction, "presentation controller created");
        Self {
            id,
            direction,
            backdrop,
            presented,
            presenting,
            container: None,
            overlay: None,
            shared: Rc::new(RefCell::new(SessionShared::default())),
        }
    }

    #[inline]
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    #[inline]
    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    pub fn state(&self) -> PresentationState {
        self.shared.borrow().state
    }

    /// The overlay view, while the session has one.
    pub fn overlay_view(&self) -> Option<ViewId> {
        self.overlay.as_ref().map(DimmingOverlay::view)
    }

    /// The presented content's root view.
    pub fn presented_view(&self) -> ViewId {
        self.presented.view()
    }

    /// Frame for the presented view given `container_bounds`.
    pub fn frame_in(&self, container_bounds: Rect) -> Rect {
        presented_frame(
            self.direction,
            self.presented.preferred_content_size(),
            container_bounds,
        )
    }

    fn container_bounds(&self, views: &dyn ViewTree) -> Option<Rect> {
        let Some(container) = self.container else {
            tracing::warn!(session = %self.id, "no container view; skipping layout");
            return None;
        };
        let bounds = views.bounds(container);
        if bounds.is_none() {
            tracing::warn!(session = %self.id, container = container.id(), "container view unknown to host");
        }
        bounds
    }

    fn advance(&self, event: SessionEvent) -> Option<PresentationState> {
        let mut shared = self.shared.borrow_mut();
        match shared.state.next(event) {
            Ok(next) => {
                tracing::debug!(
                    session = %self.id,
                    from = ?shared.state,
                    to = ?next,
                    %event,
                    "presentation state changed"
                );
                shared.state = next;
                Some(next)
            }
            Err(err) => {
                tracing::warn!(session = %self.id, %err, "ignoring lifecycle event");
                None
            }
        }
    }

    fn ensure_overlay(&mut self, views: &mut dyn ViewTree, container: ViewId) {
        if self.overlay.is_none() {
            let shared = Rc::downgrade(&self.shared);
            let presenting = Rc::clone(&self.presenting);
            let id = self.id;
            let on_tap = Box::new(move || {
                request_dismissal(&shared, presenting.as_ref(), id);
            });
            self.overlay = Some(DimmingOverlay::create(views, &self.backdrop, on_tap));
        }
        if let Some(overlay) = &self.overlay {
            if !overlay.is_installed_in(views, container) {
                overlay.install(views, container);
            }
        }
    }

    fn teardown_overlay(&mut self, views: &mut dyn ViewTree) {
        if let Some(overlay) = self.overlay.take() {
            tracing::debug!(session = %self.id, overlay = overlay.view().id(), "overlay removed");
            overlay.destroy(views);
        }
    }
}

/// Ask the presenting context to dismiss, at most once per presented period.
fn request_dismissal(
    shared: &Weak<RefCell<SessionShared>>,
    presenting: &dyn PresentingContext,
    session: SessionId,
) -> bool {
    let Some(shared) = shared.upgrade() else {
        return false;
    };
    {
        let mut shared = shared.borrow_mut();
        if shared.state != PresentationState::Presented || shared.dismiss_requested {
            tracing::debug!(
                session = %session,
                state = ?shared.state,
                already_requested = shared.dismiss_requested,
                "overlay tap ignored"
            );
            return false;
        }
        shared.dismiss_requested = true;
    }
    tracing::debug!(session = %session, "overlay tapped; requesting dismissal");
    presenting.dismiss(true);
    true
}

impl PresentationLifecycle for SlidingPresentationController {
    fn set_container_view(&mut self, container: Option<ViewId>) {
        self.container = container;
    }

    fn container_view(&self) -> Option<ViewId> {
        self.container
    }

    fn on_will_begin(
        &mut self,
        phase: TransitionPhase,
        views: &mut dyn ViewTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        let Some(container) = self.container else {
            tracing::warn!(session = %self.id, %phase, "no container view; transition not started");
            return;
        };
        if self.advance(SessionEvent::WillBegin(phase)).is_none() {
            return;
        }
        if phase.is_presenting() {
            self.ensure_overlay(views, container);
        }
        if let Some(overlay) = &self.overlay {
            tracing::debug!(
                session = %self.id,
                %phase,
                animated = coordinator.is_some(),
                "fading overlay"
            );
            overlay.fade_to(views, phase.target_alpha(), coordinator);
        }
    }

    fn on_did_end(&mut self, phase: TransitionPhase, completed: bool, views: &mut dyn ViewTree) {
        let Some(state) = self.advance(SessionEvent::DidEnd { phase, completed }) else {
            return;
        };
        match state {
            PresentationState::Dismissed => {
                self.teardown_overlay(views);
                tracing::debug!(session = %self.id, "presentation session ended");
            }
            PresentationState::Presented => {
                self.shared.borrow_mut().dismiss_requested = false;
            }
            _ => {}
        }
        if let (Some(overlay), Some(alpha)) = (&self.overlay, state.overlay_alpha()) {
            overlay.set_alpha(views, alpha);
        }
    }

    fn on_layout_invalidated(&mut self, views: &mut dyn ViewTree) {
        if self.state().is_terminal() {
            return;
        }
        let Some(bounds) = self.container_bounds(views) else {
            return;
        };
        if let Some(overlay) = &self.overlay {
            overlay.fit(views, bounds);
        }
        views.set_frame(self.presented.view(), self.frame_in(bounds));
    }

    fn on_preferred_size_changed(&mut self, views: &mut dyn ViewTree) {
        tracing::debug!(
            session = %self.id,
            preferred = ?self.presented.preferred_content_size(),
            animating = self.state().is_animating(),
            "preferred content size changed"
        );
        self.on_layout_invalidated(views);
    }

    fn on_frame_query(&self, views: &dyn ViewTree) -> Option<Rect> {
        self.container_bounds(views).map(|bounds| self.frame_in(bounds))
    }

    fn on_overlay_tapped(&mut self) {
        request_dismissal(
            &Rc::downgrade(&self.shared),
            self.presenting.as_ref(),
            self.id,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PresentedContent;
    use slide_core::{Point, Rgba, Size};
    use slide_runtime::{Timeline, TimelineCoordinator, ViewArena};
    use std::cell::Cell;
    use web_time::Duration;

    #[derive(Default)]
    struct CountingPresenter {
        dismissals: Cell<usize>,
    }

    impl PresentingContext for CountingPresenter {
        fn dismiss(&self, animated: bool) {
            assert!(animated);
            self.dismissals.set(self.dismissals.get() + 1);
        }
    }

    struct Fixture {
        arena: ViewArena,
        container: ViewId,
        content: PresentedContent,
        presenter: Rc<CountingPresenter>,
        controller: SlidingPresentationController,
    }

    fn fixture(direction: SlideDirection, preferred: Size) -> Fixture {
        let mut arena = ViewArena::new();
        let container = arena.create_root(Rect::new(0.0, 0.0, 320.0, 480.0));
        let view = arena.create_view(Rgba::WHITE);
        let content = PresentedContent::new(view, preferred);
        let presenter = Rc::new(CountingPresenter::default());
        let mut controller = SlidingPresentationController::new(
            Rc::new(content.clone()),
            presenter.clone(),
            direction,
            BackdropConfig::default(),
        );
        controller.set_container_view(Some(container));
        arena.add_subview(container, view);
        Fixture {
            arena,
            container,
            content,
            presenter,
            controller,
        }
    }

    fn present(f: &mut Fixture) {
        f.controller
            .on_will_begin(TransitionPhase::Presenting, &mut f.arena, None);
        f.controller
            .on_did_end(TransitionPhase::Presenting, true, &mut f.arena);
    }

    #[test]
    fn frame_query_follows_direction() {
        let f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        assert_eq!(
            f.controller.on_frame_query(&f.arena),
            Some(Rect::new(0.0, 280.0, 320.0, 200.0))
        );
        let f = fixture(SlideDirection::FromRight, Size::new(200.0, 480.0));
        assert_eq!(
            f.controller.on_frame_query(&f.arena),
            Some(Rect::new(120.0, 0.0, 200.0, 480.0))
        );
    }

    #[test]
    fn will_begin_installs_overlay_below_content() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        f.controller
            .on_will_begin(TransitionPhase::Presenting, &mut f.arena, None);

        let overlay = f.controller.overlay_view().expect("overlay created");
        assert_eq!(f.arena.index_in_superview(overlay), Some(0));
        assert_eq!(f.arena.superview(overlay), Some(f.container));
        assert_eq!(f.arena.frame(overlay), Some(Rect::new(0.0, 0.0, 320.0, 480.0)));
        assert_eq!(f.arena.alpha(overlay), Some(1.0), "no coordinator: immediate");
        assert_eq!(f.arena.background(overlay), Some(Rgba::rgba(0, 0, 0, 128)));
        assert_eq!(f.controller.state(), PresentationState::PresentationAnimating);
    }

    #[test]
    fn overlay_uses_configured_tint() {
        let mut arena = ViewArena::new();
        let container = arena.create_root(Rect::new(0.0, 0.0, 320.0, 480.0));
        let content = PresentedContent::new(arena.create_view(Rgba::WHITE), Size::new(10.0, 10.0));
        let mut controller = SlidingPresentationController::new(
            Rc::new(content),
            Rc::new(CountingPresenter::default()),
            SlideDirection::FromTop,
            BackdropConfig::default()
                .color(Rgba::rgb(0x20, 0x40, 0x60))
                .opacity(0.25),
        );
        controller.set_container_view(Some(container));
        controller.on_will_begin(TransitionPhase::Presenting, &mut arena, None);

        let overlay = controller.overlay_view().expect("overlay created");
        assert_eq!(arena.background(overlay), Some(Rgba::rgba(0x20, 0x40, 0x60, 64)));
    }

    #[test]
    fn coordinator_animates_overlay_alongside() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        let mut timeline = Timeline::new();
        {
            let mut coordinator =
                TimelineCoordinator::new(&mut timeline, Duration::from_millis(300));
            f.controller.on_will_begin(
                TransitionPhase::Presenting,
                &mut f.arena,
                Some(&mut coordinator),
            );
            assert_eq!(coordinator.scheduled(), 1);
        }
        let overlay = f.controller.overlay_view().expect("overlay created");
        assert_eq!(f.arena.alpha(overlay), Some(0.0));
        timeline.tick(&mut f.arena, Duration::from_millis(150));
        let mid = f.arena.alpha(overlay).unwrap_or_default();
        assert!(mid > 0.0 && mid < 1.0);
        timeline.tick(&mut f.arena, Duration::from_millis(150));
        assert_eq!(f.arena.alpha(overlay), Some(1.0));
    }

    #[test]
    fn overlay_created_once_per_session() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        present(&mut f);
        let first = f.controller.overlay_view();
        f.controller
            .on_will_begin(TransitionPhase::Presenting, &mut f.arena, None);
        assert_eq!(f.controller.overlay_view(), first);
        let overlays = f
            .arena
            .subviews(f.container)
            .into_iter()
            .filter(|v| Some(*v) == first)
            .count();
        assert_eq!(overlays, 1);
    }

    #[test]
    fn dismissal_fades_and_tears_down() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        present(&mut f);
        let overlay = f.controller.overlay_view().expect("overlay");

        f.controller
            .on_will_begin(TransitionPhase::Dismissing, &mut f.arena, None);
        assert_eq!(f.arena.alpha(overlay), Some(0.0));
        f.controller
            .on_did_end(TransitionPhase::Dismissing, true, &mut f.arena);

        assert_eq!(f.controller.state(), PresentationState::Dismissed);
        assert_eq!(f.controller.overlay_view(), None);
        assert!(!f.arena.contains(overlay));
    }

    #[test]
    fn cancelled_dismissal_restores_overlay() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        present(&mut f);
        let overlay = f.controller.overlay_view().expect("overlay");
        f.controller
            .on_will_begin(TransitionPhase::Dismissing, &mut f.arena, None);
        f.controller
            .on_did_end(TransitionPhase::Dismissing, false, &mut f.arena);

        assert_eq!(f.controller.state(), PresentationState::Presented);
        assert_eq!(f.arena.alpha(overlay), Some(1.0));
    }

    #[test]
    fn aborted_presentation_removes_overlay() {
        let mut f = fixture(SlideDirection::FromLeft, Size::new(200.0, 480.0));
        f.controller
            .on_will_begin(TransitionPhase::Presenting, &mut f.arena, None);
        let overlay = f.controller.overlay_view().expect("overlay");
        f.controller
            .on_did_end(TransitionPhase::Presenting, false, &mut f.arena);
        assert_eq!(f.controller.state(), PresentationState::Dismissed);
        assert!(!f.arena.contains(overlay));
    }

    #[test]
    fn tap_requests_dismissal_once() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        present(&mut f);

        assert_eq!(
            f.arena.tap(f.container, Point::new(10.0, 10.0)),
            f.controller.overlay_view()
        );
        f.arena.tap(f.container, Point::new(20.0, 20.0));
        f.controller.on_overlay_tapped();
        assert_eq!(f.presenter.dismissals.get(), 1);
    }

    #[test]
    fn tap_before_presented_is_ignored() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        f.controller.on_overlay_tapped();
        f.controller
            .on_will_begin(TransitionPhase::Presenting, &mut f.arena, None);
        f.arena.tap(f.container, Point::new(10.0, 10.0));
        assert_eq!(f.presenter.dismissals.get(), 0);
    }

    #[test]
    fn tap_allowed_again_after_cancelled_dismissal() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        present(&mut f);
        f.controller.on_overlay_tapped();
        f.controller
            .on_will_begin(TransitionPhase::Dismissing, &mut f.arena, None);
        f.controller
            .on_did_end(TransitionPhase::Dismissing, false, &mut f.arena);
        f.controller.on_overlay_tapped();
        assert_eq!(f.presenter.dismissals.get(), 2);
    }

    #[test]
    fn layout_tracks_preferred_size_and_container() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        present(&mut f);
        let view = f.controller.presented_view();

        f.controller.on_layout_invalidated(&mut f.arena);
        assert_eq!(f.arena.frame(view), Some(Rect::new(0.0, 280.0, 320.0, 200.0)));

        f.content
            .set_preferred_content_size(Size::new(320.0, 300.0));
        f.controller.on_preferred_size_changed(&mut f.arena);
        assert_eq!(f.arena.frame(view), Some(Rect::new(0.0, 180.0, 320.0, 300.0)));

        f.arena
            .set_frame(f.container, Rect::new(0.0, 0.0, 480.0, 250.0));
        f.controller.on_layout_invalidated(&mut f.arena);
        assert_eq!(f.arena.frame(view), Some(Rect::new(0.0, 0.0, 320.0, 250.0)));
        let overlay = f.controller.overlay_view().expect("overlay");
        assert_eq!(f.arena.frame(overlay), Some(Rect::new(0.0, 0.0, 480.0, 250.0)));
    }

    #[test]
    #[tracing_test::traced_test]
    fn missing_container_is_a_logged_noop() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        f.controller.set_container_view(None);
        let view = f.controller.presented_view();
        let before = f.arena.frame(view);

        assert_eq!(f.controller.on_frame_query(&f.arena), None);
        f.controller.on_layout_invalidated(&mut f.arena);
        f.controller
            .on_will_begin(TransitionPhase::Presenting, &mut f.arena, None);

        assert_eq!(f.arena.frame(view), before);
        assert_eq!(f.controller.overlay_view(), None);
        assert_eq!(f.controller.state(), PresentationState::Initial);
        assert!(logs_contain("no container view"));

        f.controller.set_container_view(Some(f.container));
        f.controller
            .on_will_begin(TransitionPhase::Presenting, &mut f.arena, None);
        assert_eq!(f.controller.state(), PresentationState::PresentationAnimating);
        assert!(f.controller.overlay_view().is_some());
    }

    #[test]
    #[tracing_test::traced_test]
    fn out_of_sequence_event_is_ignored() {
        let mut f = fixture(SlideDirection::FromBottom, Size::new(320.0, 200.0));
        f.controller
            .on_will_begin(TransitionPhase::Dismissing, &mut f.arena, None);
        assert_eq!(f.controller.state(), PresentationState::Initial);
        assert_eq!(f.controller.overlay_view(), None);
        assert!(logs_contain("ignoring lifecycle event"));
    }
}
