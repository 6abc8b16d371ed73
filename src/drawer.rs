//! Settings drawer opened by a horizontal swipe.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::debug;

/// Horizontal travel, in logical pixels, a swipe must exceed to open the drawer.
pub const SWIPE_THRESHOLD: f64 = 150.0;

/// Records the first and latest horizontal touch positions of one gesture.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeGesture {
    start_x: Option<f64>,
    last_x: Option<f64>,
}

impl SwipeGesture {
    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.last_x = None;
    }

    pub fn touch_move(&mut self, x: f64) {
        if self.start_x.is_some() {
            self.last_x = Some(x);
        }
    }

    pub fn displacement(&self) -> f64 {
        match (self.start_x, self.last_x) {
            (Some(start), Some(last)) => last - start,
            _ => 0.0,
        }
    }

    /// Ends the gesture and reports whether it travelled far enough either way.
    pub fn touch_end(&mut self) -> bool {
        let travelled = self.displacement().abs();
        *self = Self::default();
        travelled > SWIPE_THRESHOLD
    }
}

/// Whether the page behind the drawer may scroll. Shared with whoever
/// renders the page.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    scroll_locked: Arc<AtomicBool>,
}

impl Viewport {
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked.load(Ordering::SeqCst)
    }

    pub fn lock_scroll(&self) -> ScrollLock {
        self.scroll_locked.store(true, Ordering::SeqCst);
        ScrollLock {
            scroll_locked: Arc::clone(&self.scroll_locked),
        }
    }
}

/// Scrolling comes back when this guard drops, however that happens.
#[derive(Debug)]
pub struct ScrollLock {
    scroll_locked: Arc<AtomicBool>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.scroll_locked.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerState {
    Closed,
    Open,
}

#[derive(Debug)]
pub struct Drawer {
    viewport: Viewport,
    gesture: SwipeGesture,
    scroll_lock: Option<ScrollLock>,
}

impl Drawer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            gesture: SwipeGesture::default(),
            scroll_lock: None,
        }
    }

    pub fn state(&self) -> DrawerState {
        if self.scroll_lock.is_some() {
            DrawerState::Open
        } else {
            DrawerState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == DrawerState::Open
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn touch_start(&mut self, x: f64) {
        self.gesture.touch_start(x);
    }

    pub fn touch_move(&mut self, x: f64) {
        self.gesture.touch_move(x);
    }

    pub fn touch_end(&mut self) -> DrawerState {
        if self.gesture.touch_end() && self.scroll_lock.is_none() {
            debug!("swipe opened settings drawer");
            self.scroll_lock = Some(self.viewport.lock_scroll());
        }
        self.state()
    }

    /// A whole gesture reported at once: where it started and the last sample.
    pub fn swipe(&mut self, start_x: f64, end_x: f64) -> DrawerState {
        self.touch_start(start_x);
        self.touch_move(end_x);
        self.touch_end()
    }

    pub fn close(&mut self) -> DrawerState {
        self.scroll_lock = None;
        self.state()
    }
}
