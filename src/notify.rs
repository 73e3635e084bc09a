//! The transient "new repositories available" banner.
//!
//! Showing the banner schedules a dismissal task and keeps its
//! [`DismissHandle`]. A manual dismiss cancels that handle. Timer events carry
//! the generation of the banner that scheduled them so a late event from an
//! earlier banner is ignored.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub const DEFAULT_VISIBLE_FOR: Duration = Duration::from_secs(8);
pub const DEFAULT_FADE_FOR: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    Hidden,
    Visible,
    Fading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerEvent {
    Fade(u64),
    Expire(u64),
}

/// A pending auto-dismiss. Dropping or cancelling it stops the timer.
#[derive(Debug)]
pub struct DismissHandle {
    task: JoinHandle<()>,
}

impl DismissHandle {
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for DismissHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Send `Fade` after `visible_for`, then `Expire` after a further `fade_for`.
pub fn schedule_dismiss(
    generation: u64,
    visible_for: Duration,
    fade_for: Duration,
    events: UnboundedSender<BannerEvent>,
) -> DismissHandle {
    let task = tokio::spawn(async move {
        tokio::time::sleep(visible_for).await;
        if events.send(BannerEvent::Fade(generation)).is_err() {
            return;
        }
        tokio::time::sleep(fade_for).await;
        let _ = events.send(BannerEvent::Expire(generation));
    });
    DismissHandle { task }
}

#[derive(Debug)]
pub struct Banner {
    phase: BannerPhase,
    generation: u64,
    visible_for: Duration,
    fade_for: Duration,
    timer: Option<DismissHandle>,
    events: UnboundedSender<BannerEvent>,
}

impl Banner {
    pub fn new(
        visible_for: Duration,
        fade_for: Duration,
        events: UnboundedSender<BannerEvent>,
    ) -> Self {
        Self {
            phase: BannerPhase::Hidden,
            generation: 0,
            visible_for,
            fade_for,
            timer: None,
            events,
        }
    }

    pub fn phase(&self) -> BannerPhase {
        self.phase
    }

    pub fn is_shown(&self) -> bool {
        self.phase != BannerPhase::Hidden
    }

    /// Show (or re-show) the banner and restart its auto-dismiss timer.
    /// Must be called from within a tokio runtime.
    pub fn show(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.generation += 1;
        self.phase = BannerPhase::Visible;
        self.timer = Some(schedule_dismiss(
            self.generation,
            self.visible_for,
            self.fade_for,
            self.events.clone(),
        ));
        tracing::debug!(generation = self.generation, "Update banner shown");
    }

    /// Manual dismissal. Returns `false` if nothing was showing.
    pub fn dismiss(&mut self) -> bool {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if self.phase == BannerPhase::Hidden {
            return false;
        }
        self.phase = BannerPhase::Hidden;
        true
    }

    /// Apply a timer event. Returns `true` if the phase changed.
    pub fn handle(&mut self, event: BannerEvent) -> bool {
        match event {
            BannerEvent::Fade(generation)
                if generation == self.generation && self.phase == BannerPhase::Visible =>
            {
                self.phase = BannerPhase::Fading;
                true
            }
            BannerEvent::Expire(generation)
                if generation == self.generation && self.phase == BannerPhase::Fading =>
            {
                self.phase = BannerPhase::Hidden;
                self.timer = None;
                true
            }
            _ => false,
        }
    }
}
