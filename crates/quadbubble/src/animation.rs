use crate::geometry::{ArcGeometry, Offset, Size};
use crate::layout::Visual;
use crate::model::AxisGlyph;
use crate::quadrant::Orientation;
use std::time::{Duration, Instant};

pub const TRANSITION_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Expand,
    Collapse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    TranslationX,
    TranslationY,
}

/// One animated property of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub item: usize,
    pub property: Property,
    pub from: f64,
    pub to: f64,
}

impl Track {
    fn value_at(&self, progress: f64) -> f64 {
        self.from + (self.to - self.from) * progress
    }

    fn write(&self, value: f64, items: &mut [Visual]) {
        let Some(visual) = items.get_mut(self.item) else {
            log::warn!("Animation track for missing item {}", self.item);
            return;
        };
        match self.property {
            Property::TranslationX => visual.translation.dx = value,
            Property::TranslationY => visual.translation.dy = value,
        }
    }
}

/// Work left for the menu once a collapse has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continuation {
    pub glyph: AxisGlyph,
    pub relayout: bool,
}

/// A set of tracks that play together for [`TRANSITION_DURATION`].
#[derive(Debug, Clone)]
pub struct Transition {
    kind: TransitionKind,
    tracks: Vec<Track>,
    duration: Duration,
    started_at: Option<Instant>,
    continuation: Option<Continuation>,
}

impl Transition {
    fn new(kind: TransitionKind, tracks: Vec<Track>) -> Self {
        Self {
            kind,
            tracks,
            duration: TRANSITION_DURATION,
            started_at: None,
            continuation: None,
        }
    }

    /// Tracks moving every item from its collapsed offset to zero.
    pub fn expand(
        arc: &ArcGeometry,
        real_count: usize,
        container: Size,
        orientation: Orientation,
    ) -> Self {
        let tracks = offset_tracks(arc, real_count, container, orientation, |collapsed| {
            (collapsed, 0.0)
        });
        Self::new(TransitionKind::Expand, tracks)
    }

    /// Tracks moving every item from zero to its collapsed offset.
    pub fn collapse(
        arc: &ArcGeometry,
        real_count: usize,
        container: Size,
        orientation: Orientation,
        continuation: Continuation,
    ) -> Self {
        let tracks = offset_tracks(arc, real_count, container, orientation, |collapsed| {
            (0.0, collapsed)
        });
        Self {
            continuation: Some(continuation),
            ..Self::new(TransitionKind::Collapse, tracks)
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn progress(&self, now: Instant) -> f64 {
        self.started_at
            .map(|start| {
                let elapsed = now.saturating_duration_since(start).as_secs_f64();
                (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
            })
            .unwrap_or(0.0)
    }

    fn write(&self, progress: f64, items: &mut [Visual]) {
        for track in &self.tracks {
            // exact targets at the end, no interpolation error
            let value = if progress >= 1.0 {
                track.to
            } else {
                track.value_at(progress)
            };
            track.write(value, items);
        }
    }
}

/// The collapsed offset is split into X and Y tracks; a single item only
/// travels vertically.
fn offset_tracks(
    arc: &ArcGeometry,
    real_count: usize,
    container: Size,
    orientation: Orientation,
    ends: impl Fn(f64) -> (f64, f64),
) -> Vec<Track> {
    let track = |item, property, collapsed| {
        let (from, to) = ends(collapsed);
        Track {
            item,
            property,
            from,
            to,
        }
    };

    if real_count == 1 {
        let offset = arc.collapsed_offset(0, 1, container, orientation);
        return vec![track(0, Property::TranslationY, offset.dy)];
    }

    (0..real_count)
        .flat_map(|i| {
            let Offset { dx, dy } = arc.collapsed_offset(i, real_count, container, orientation);
            [
                track(i, Property::TranslationX, dx),
                track(i, Property::TranslationY, dy),
            ]
        })
        .collect()
}

/// A transition that has stopped, either at its natural end or forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finished {
    pub kind: TransitionKind,
    pub continuation: Option<Continuation>,
}

/// Owns at most one running transition.
#[derive(Debug, Default)]
pub struct ToggleAnimator {
    active: Option<Transition>,
}

impl ToggleAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<TransitionKind> {
        self.active.as_ref().map(Transition::kind)
    }

    /// Starts `transition` at `now`. A transition still in flight is ended
    /// first and handed back so its continuation is not lost.
    pub fn start(
        &mut self,
        mut transition: Transition,
        now: Instant,
        items: &mut [Visual],
    ) -> Option<Finished> {
        let previous = self.end(items);

        transition.started_at = Some(now);
        transition.write(0.0, items);
        log::debug!(
            "Starting {:?} transition with {} tracks",
            transition.kind,
            transition.tracks.len()
        );
        self.active = Some(transition);

        previous
    }

    /// Advances the running transition to `now`.
    pub fn tick(&mut self, now: Instant, items: &mut [Visual]) -> Option<Finished> {
        let progress = self.active.as_ref()?.progress(now);
        log::trace!("Transition progress {:.3}", progress);

        if progress < 1.0 {
            if let Some(transition) = &self.active {
                transition.write(progress, items);
            }
            return None;
        }
        self.end(items)
    }

    /// Jumps the running transition to its targets.
    pub fn end(&mut self, items: &mut [Visual]) -> Option<Finished> {
        let mut transition = self.active.take()?;
        transition.write(1.0, items);
        Some(Finished {
            kind: transition.kind,
            continuation: transition.continuation.take(),
        })
    }
}
