//! Stroke fusion: turns accepted sensor samples into drawing commands.
//!
//! The engine tracks at most one logical stroke. Every sample goes through the
//! same pipeline: force gate, device-to-surface remap, gap-closing, then
//! dispatch on the contact phase.

use super::events::TouchEvent;
use super::record::InputSample;
use crate::config::{FusionConfig, SurfaceConfig};
use crate::util::Point;

/// Instruction for the canvas produced by the fusion engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawingCommand {
    /// Start a new stroke at the given surface position
    Begin(Point),
    /// Add a point to the active stroke
    Extend(Point),
    /// Finalize the active stroke into the history
    Commit,
}

/// Fixed linear mapping from sensor coordinates onto the drawing surface.
///
/// The sensor is mounted rotated relative to the display: device y runs along
/// the surface width and device x runs along the surface height, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    pub width: f64,
    pub height: f64,
    pub device_x_extent: f64,
    pub device_y_extent: f64,
}

impl SurfaceMapping {
    pub fn new(surface: &SurfaceConfig, fusion: &FusionConfig) -> Self {
        Self {
            width: surface.width as f64,
            height: surface.height as f64,
            device_x_extent: fusion.device_x_extent,
            device_y_extent: fusion.device_y_extent,
        }
    }

    /// Maps a device-space position to surface space.
    pub fn remap(&self, x: f64, y: f64) -> Point {
        Point::new(
            y * self.width / self.device_y_extent,
            self.height - x * self.height / self.device_x_extent,
        )
    }
}

/// Single-stroke fusion state machine.
#[derive(Debug, Clone)]
pub struct FusionEngine {
    mapping: SurfaceMapping,
    force_threshold: f64,
    gap_threshold: f64,
    touch_tolerance: f64,
    /// Surface position of the last accepted sample
    previous: Option<Point>,
    /// Last point added to the active stroke; `None` while idle
    last: Option<Point>,
}

impl FusionEngine {
    pub fn new(mapping: SurfaceMapping, config: &FusionConfig) -> Self {
        Self {
            mapping,
            force_threshold: config.force_threshold,
            gap_threshold: config.gap_threshold,
            touch_tolerance: config.touch_tolerance,
            previous: None,
            last: None,
        }
    }

    pub fn mapping(&self) -> &SurfaceMapping {
        &self.mapping
    }

    /// Whether a stroke is currently open.
    pub fn stroke_active(&self) -> bool {
        self.last.is_some()
    }

    /// Feeds one sample through the pipeline.
    ///
    /// Returns the commands to apply, in order. Usually zero or one; a gap
    /// jump yields a `Commit` for the old stroke followed by the command that
    /// opens the new one.
    pub fn on_sample(&mut self, sample: &InputSample) -> Vec<DrawingCommand> {
        let mut commands = Vec::new();
        if !sample.is_valid() {
            return commands;
        }

        if sample.force < self.force_threshold && sample.event != TouchEvent::End {
            log::trace!("Force {:.0} below threshold, sample ignored", sample.force);
            return commands;
        }

        let point = self.mapping.remap(sample.x, sample.y);
        let mut event = sample.event;

        if let (Some(_), Some(previous)) = (self.last, self.previous)
            && previous.distance_to(point) > self.gap_threshold
        {
            log::debug!(
                "Jump of {:.1} exceeds gap threshold, splitting stroke",
                previous.distance_to(point)
            );
            commands.push(DrawingCommand::Commit);
            self.last = None;
            if event == TouchEvent::Move {
                event = TouchEvent::Start;
            }
        }
        self.previous = Some(point);

        match event {
            TouchEvent::Start => {
                if self.last.is_some() {
                    commands.push(DrawingCommand::Commit);
                }
                commands.push(DrawingCommand::Begin(point));
                self.last = Some(point);
            }
            TouchEvent::Move => match self.last {
                None => {
                    commands.push(DrawingCommand::Begin(point));
                    self.last = Some(point);
                }
                Some(last) => {
                    let dx = (point.x - last.x).abs();
                    let dy = (point.y - last.y).abs();
                    if dx >= self.touch_tolerance || dy >= self.touch_tolerance {
                        commands.push(DrawingCommand::Extend(point));
                        self.last = Some(point);
                    }
                }
            },
            TouchEvent::End => {
                if self.last.take().is_some() {
                    commands.push(DrawingCommand::Commit);
                }
            }
            TouchEvent::Invalid => {}
        }

        commands
    }

    /// Ends the open stroke as if a real END had arrived at its last position.
    pub fn synthesize_end(&mut self) -> Option<DrawingCommand> {
        self.last.take().map(|_| DrawingCommand::Commit)
    }

    /// Forgets the open stroke and the previous-sample slot.
    pub fn reset(&mut self) {
        self.previous = None;
        self.last = None;
    }
}
