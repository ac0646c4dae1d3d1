//! Running/Stopped lifecycle shared by every host.

use crate::field::FieldState;
use crate::viewport::Viewport;

/// Anything that can draw a [`FieldState`] to an output surface.
///
/// Construction is initialisation: a renderer that could not acquire its
/// drawing context is never built. `dispose` must be safe to call more
/// than once.
pub trait FieldRenderer {
    fn resize(&mut self, viewport: &Viewport);
    fn render(&mut self, field: &FieldState) -> anyhow::Result<()>;
    fn dispose(&mut self);
    fn is_disposed(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Running,
    Stopped,
}

pub struct Animator {
    field: FieldState,
    renderer: Box<dyn FieldRenderer>,
    state: AnimatorState,
    render_errors: u64,
}

impl Animator {
    pub fn new(field: FieldState, mut renderer: Box<dyn FieldRenderer>) -> Self {
        renderer.resize(field.viewport());
        log::info!(
            "animator started with {} particles (max {})",
            field.len(),
            field.config().max_particles
        );
        Self {
            field,
            renderer,
            state: AnimatorState::Running,
            render_errors: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn field(&self) -> &FieldState {
        &self.field
    }

    pub fn renderer(&self) -> &dyn FieldRenderer {
        self.renderer.as_ref()
    }

    /// Number of frames whose render call failed.
    pub fn render_errors(&self) -> u64 {
        self.render_errors
    }

    /// Advance and draw one frame. Returns whether another frame should be
    /// scheduled.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.field.advance(now_ms);
        if let Err(e) = self.renderer.render(&self.field) {
            self.render_errors += 1;
            log::error!("render failed: {e:#}");
        }
        true
    }

    /// Full field reset for a new viewport, applied before the next frame.
    pub fn resize(&mut self, viewport: Viewport) {
        if !self.is_running() {
            return;
        }
        self.field.reset(viewport);
        self.renderer.resize(&viewport);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) {
        if self.is_running() {
            self.field.pointer_move(x, y, now_ms);
        }
    }

    /// Release renderer resources and stop. Later calls do nothing.
    pub fn stop(&mut self) {
        if self.state == AnimatorState::Stopped {
            return;
        }
        self.state = AnimatorState::Stopped;
        self.renderer.dispose();
        log::info!("animator stopped after {} frames", self.field.frame());
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.stop();
    }
}
