//! Mount/unmount lifecycle and event routing
//!
//! A [`Host`] is whatever embeds the field: a browser canvas, the headless
//! CLI, or a test double. The [`Controller`] owns the host and the field and
//! decides which host services to touch at each point of the lifecycle.

use tracing::{debug, info};

use super::field::DotField;
use super::params::FieldParams;
use super::state::{DisableReason, FieldState};
use super::surface::{Surface, Viewport};

/// Services the embedding environment provides to a dot field.
pub trait Host {
    type Surface: Surface;

    /// OS-level reduced-motion preference, read once at mount
    fn prefers_reduced_motion(&self) -> bool;

    /// The drawing surface, if one could be obtained
    fn surface(&mut self) -> Option<&mut Self::Surface>;

    /// Size the surface to its container and report the logical viewport.
    /// `None` when there is no container to measure.
    fn fit_viewport(&mut self) -> Option<Viewport>;

    /// Raw themeable dot color, resolved by the field
    fn dot_color(&self) -> Option<String>;

    /// Start delivering pointer, resize and theme events
    fn attach_listeners(&mut self);

    fn detach_listeners(&mut self);

    /// Ask for [`Controller::on_frame`] at the next display refresh
    fn request_frame(&mut self);

    fn cancel_frame(&mut self);
}

/// Drives a [`DotField`] through its host.
pub struct Controller<H: Host> {
    host: H,
    field: Option<DotField>,
    state: FieldState,
}

impl<H: Host> Controller<H> {
    /// Build the grid and start the frame loop, unless the host rules it out.
    pub fn mount(mut host: H, params: FieldParams) -> Self {
        if host.prefers_reduced_motion() {
            return Self::disabled(host, DisableReason::ReducedMotion);
        }
        if host.surface().is_none() {
            return Self::disabled(host, DisableReason::NoSurface);
        }
        let Some(viewport) = host.fit_viewport() else {
            return Self::disabled(host, DisableReason::NoContainer);
        };

        let mut field = DotField::new(params);
        field.set_color(host.dot_color().as_deref());
        field.resize(viewport);

        host.request_frame();
        host.attach_listeners();

        info!(
            cols = field.layout().cols,
            rows = field.layout().rows,
            color = field.color(),
            "Dot field mounted"
        );

        Self {
            host,
            field: Some(field),
            state: FieldState::Running,
        }
    }

    fn disabled(host: H, reason: DisableReason) -> Self {
        info!(%reason, "Dot field disabled");
        Self {
            host,
            field: None,
            state: FieldState::Disabled(reason),
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn field(&self) -> Option<&DotField> {
        self.field.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn running_field(&mut self) -> Option<&mut DotField> {
        if !self.state.is_running() {
            return None;
        }
        self.field.as_mut()
    }

    /// Re-measure, re-read the color and rebuild the grid.
    /// Without a container the previous grid stays in place.
    pub fn on_resize(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };
        match self.host.fit_viewport() {
            Some(viewport) => {
                field.set_color(self.host.dot_color().as_deref());
                field.resize(viewport);
            }
            None => debug!("No container on resize, keeping grid"),
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if let Some(field) = self.running_field() {
            field.pointer_move(x, y);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if let Some(field) = self.running_field() {
            field.pointer_leave();
        }
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        if let Some(field) = self.running_field() {
            field.pointer_down(x, y);
        }
    }

    /// The page switched themes; refresh the cached color.
    pub fn on_theme_changed(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };
        field.set_color(self.host.dot_color().as_deref());
        debug!(color = field.color(), "Theme changed");
    }

    /// One simulation step and redraw, then schedule the next frame.
    pub fn on_frame(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };
        field.step();
        if let Some(surface) = self.host.surface() {
            field.draw(surface);
        }
        self.host.request_frame();
    }

    /// Stop the loop and release every listener.
    pub fn unmount(&mut self) {
        if self.state.is_running() {
            self.host.cancel_frame();
            self.host.detach_listeners();
            info!(frames = self.field.as_ref().map_or(0, DotField::frame_count), "Dot field unmounted");
        }
        self.field = None;
        self.state = FieldState::Unmounted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeHost;
    use crate::theme::colors;

    fn mount(host: FakeHost) -> Controller<FakeHost> {
        Controller::mount(host, FieldParams::default())
    }

    #[test]
    fn reduced_motion_does_nothing_at_all() {
        let mut ctrl = mount(FakeHost {
            reduced_motion: true,
            ..FakeHost::new(800.0, 600.0)
        });
        assert_eq!(ctrl.state(), FieldState::Disabled(DisableReason::ReducedMotion));
        assert!(ctrl.field().is_none());

        ctrl.on_resize();
        ctrl.on_pointer_move(10.0, 10.0);
        ctrl.on_frame();

        let host = ctrl.host();
        assert_eq!(host.listeners_attached, 0);
        assert_eq!(host.frames_requested, 0);
        assert_eq!(host.surface_requests, 0);
        assert_eq!(host.viewport_fits, 0);
        assert_eq!(host.surface.clears, 0);
        assert!(host.surface.fills.is_empty());
    }

    #[test]
    fn missing_surface_is_silent_no_op() {
        let ctrl = mount(FakeHost {
            has_surface: false,
            ..FakeHost::new(800.0, 600.0)
        });
        assert_eq!(ctrl.state(), FieldState::Disabled(DisableReason::NoSurface));
        assert_eq!(ctrl.host().listeners_attached, 0);
        assert_eq!(ctrl.host().frames_requested, 0);
    }

    #[test]
    fn missing_container_is_silent_no_op() {
        let ctrl = mount(FakeHost {
            viewport: None,
            ..FakeHost::new(800.0, 600.0)
        });
        assert_eq!(ctrl.state(), FieldState::Disabled(DisableReason::NoContainer));
        assert_eq!(ctrl.host().listeners_attached, 0);
    }

    #[test]
    fn mount_builds_grid_and_starts_loop() {
        let ctrl = mount(FakeHost {
            color: Some("#444".into()),
            ..FakeHost::new(280.0, 280.0)
        });
        assert!(ctrl.state().is_running());
        let field = ctrl.field().unwrap();
        assert_eq!(field.particles().len(), 100);
        assert_eq!(field.color(), "#444");
        assert_eq!(ctrl.host().listeners_attached, 1);
        assert_eq!(ctrl.host().frames_requested, 1);
    }

    #[test]
    fn each_frame_draws_once_and_reschedules() {
        let mut ctrl = mount(FakeHost::new(280.0, 280.0));
        for _ in 0..3 {
            ctrl.on_frame();
        }
        let host = ctrl.host();
        assert_eq!(host.surface.clears, 3);
        assert_eq!(host.surface.fills.len(), 3);
        assert!(host.surface.fills.iter().all(|f| f.dots == 100));
        assert_eq!(host.frames_requested, 4);
        assert_eq!(ctrl.field().unwrap().frame_count(), 3);
    }

    #[test]
    fn resize_without_container_keeps_previous_grid() {
        let mut ctrl = mount(FakeHost::new(280.0, 280.0));
        ctrl.host_mut().viewport = None;
        ctrl.on_resize();
        assert_eq!(ctrl.field().unwrap().particles().len(), 100);

        ctrl.host_mut().viewport = Some(Viewport::new(560.0, 56.0, 2.0));
        ctrl.on_resize();
        let field = ctrl.field().unwrap();
        assert_eq!(field.particles().len(), 40);
        assert_eq!(field.viewport().pixel_ratio, 2.0);
    }

    #[test]
    fn resize_and_theme_change_reread_color() {
        let mut ctrl = mount(FakeHost::new(280.0, 280.0));
        assert_eq!(ctrl.field().unwrap().color(), colors::FALLBACK_DOT);

        ctrl.host_mut().color = Some("#101010".into());
        ctrl.on_theme_changed();
        assert_eq!(ctrl.field().unwrap().color(), "#101010");

        ctrl.host_mut().color = Some("  ".into());
        ctrl.on_resize();
        assert_eq!(ctrl.field().unwrap().color(), colors::FALLBACK_DOT);

        ctrl.host_mut().color = Some("white".into());
        ctrl.on_frame();
        assert_eq!(ctrl.host().surface.fills[0].color, colors::FALLBACK_DOT);
    }

    #[test]
    fn pointer_events_reach_the_field() {
        let mut ctrl = mount(FakeHost::new(280.0, 280.0));
        ctrl.on_pointer_move(3.0, 4.0);
        ctrl.on_pointer_down(5.0, 6.0);
        let pointer = *ctrl.field().unwrap().pointer();
        assert_eq!(pointer.position, Some((3.0, 4.0)));
        assert_eq!((pointer.pulse.x, pointer.pulse.y, pointer.pulse.strength), (5.0, 6.0, 1.0));

        ctrl.on_pointer_leave();
        assert_eq!(ctrl.field().unwrap().pointer().position, None);
    }

    #[test]
    fn unmount_cancels_and_detaches() {
        let mut ctrl = mount(FakeHost::new(280.0, 280.0));
        ctrl.on_frame();
        ctrl.unmount();
        assert_eq!(ctrl.state(), FieldState::Unmounted);
        assert!(ctrl.field().is_none());
        assert_eq!(ctrl.host().frames_cancelled, 1);
        assert_eq!(ctrl.host().listeners_detached, 1);

        ctrl.on_frame();
        ctrl.unmount();
        assert_eq!(ctrl.host().surface.fills.len(), 1);
        assert_eq!(ctrl.host().listeners_detached, 1);
    }

    #[test]
    fn unmount_of_disabled_field_touches_nothing() {
        let mut ctrl = mount(FakeHost {
            reduced_motion: true,
            ..FakeHost::new(280.0, 280.0)
        });
        ctrl.unmount();
        assert_eq!(ctrl.state(), FieldState::Unmounted);
        assert_eq!(ctrl.host().frames_cancelled, 0);
        assert_eq!(ctrl.host().listeners_detached, 0);
    }
}
