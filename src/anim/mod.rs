//! Tween scheduling for animated transitions.
//!
//! `render` schedules tweens synchronously; the host's animation loop
//! pumps [`crate::Surface::advance`] which resolves each tween against
//! the scene. Scheduling a tween against a key that already has one in
//! flight replaces it (last-call-wins) — there is never a backlog of
//! queued transitions.

use indexmap::IndexMap;
use smallvec::SmallVec;

/// Milliseconds on the caller's animation clock.
pub type TimeMs = f64;

/// Axis discriminator used by attribute paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarAttr {
    X,
    Y,
    Width,
    Height,
    Opacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickAttr {
    Offset,
    Opacity,
}

/// Address of one animatable scene attribute.
///
/// Tweens target paths, not node references, so a node removed between
/// frames simply orphans its tweens instead of dangling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrPath {
    Bar { key: String, attr: BarAttr },
    Tick { axis: AxisKind, key: String, attr: TickAttr },
    GridOpacity { axis: AxisKind },
}

/// One time-bounded linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start: TimeMs,
    pub duration: TimeMs,
}

impl Tween {
    #[must_use]
    pub fn finished(self, now: TimeMs) -> bool {
        if self.duration <= 0.0 {
            return true;
        }
        ((now - self.start) / self.duration) >= 1.0
    }

    #[must_use]
    pub fn value(self, now: TimeMs) -> f64 {
        if self.finished(now) {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let progress = ((now - self.start) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * progress
    }
}

/// A short sequence of tweens on one attribute, e.g. the gridline
/// fade-out-then-in pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenChain {
    segments: SmallVec<[Tween; 2]>,
}

impl TweenChain {
    #[must_use]
    pub fn single(tween: Tween) -> Self {
        let mut segments = SmallVec::new();
        segments.push(tween);
        Self { segments }
    }

    #[must_use]
    pub fn pair(first: Tween, second: Tween) -> Self {
        let mut segments = SmallVec::new();
        segments.push(first);
        segments.push(second);
        Self { segments }
    }

    #[must_use]
    pub fn finished(&self, now: TimeMs) -> bool {
        self.segments.iter().all(|segment| segment.finished(now))
    }

    /// Value at `now`: the active segment's interpolation, holding the
    /// previous segment's target between segments.
    #[must_use]
    pub fn value(&self, now: TimeMs) -> f64 {
        let mut value = self.segments[0].value(now);
        for segment in &self.segments {
            if now >= segment.start {
                value = segment.value(now);
            }
        }
        value
    }
}

/// Keyed collection of in-flight tween chains.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    active: IndexMap<AttrPath, TweenChain>,
    now: TimeMs,
}

impl TweenScheduler {
    /// Latest time the scheduler was advanced to. New tweens are anchored
    /// here.
    #[must_use]
    pub fn now(&self) -> TimeMs {
        self.now
    }

    /// Schedules a chain, superseding any in-flight chain on the same
    /// path.
    pub fn schedule(&mut self, path: AttrPath, chain: TweenChain) {
        self.active.insert(path, chain);
    }

    /// Schedules one delayed tween from `from` to `to`.
    pub fn schedule_one(&mut self, path: AttrPath, from: f64, to: f64, delay: TimeMs, duration: TimeMs) {
        let tween = Tween {
            from,
            to,
            start: self.now + delay,
            duration,
        };
        self.schedule(path, TweenChain::single(tween));
    }

    pub fn cancel(&mut self, path: &AttrPath) {
        self.active.shift_remove(path);
    }

    /// Drops every tween addressing a bar key.
    pub fn cancel_bar(&mut self, key: &str) {
        self.active
            .retain(|path, _| !matches!(path, AttrPath::Bar { key: bar_key, .. } if bar_key == key));
    }

    /// Whether any tween still addresses a bar key.
    #[must_use]
    pub fn has_bar_tweens(&self, key: &str) -> bool {
        self.active
            .keys()
            .any(|path| matches!(path, AttrPath::Bar { key: bar_key, .. } if bar_key == key))
    }

    /// Moves the clock forward and resolves every active chain, dropping
    /// finished ones. Returns `(path, value)` pairs for the caller to
    /// apply to the scene.
    pub fn advance(&mut self, now: TimeMs) -> Vec<(AttrPath, f64)> {
        self.now = now;
        let updates: Vec<(AttrPath, f64)> = self
            .active
            .iter()
            .map(|(path, chain)| (path.clone(), chain.value(now)))
            .collect();
        self.active.retain(|_, chain| !chain.finished(now));
        updates
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}
