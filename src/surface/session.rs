// Owns parsing, fusion, the canvas and the watchdog, and applies every
// queued command in arrival order on the surface task.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::{BackingSurface, SurfaceCommand};
use crate::config::Config;
use crate::draw::Color;
use crate::export::Exporter;
use crate::input::{
    CanvasState, FusionEngine, GestureDetector, GestureEvent, InputSample, NoGestures,
    RecordParser, SurfaceMapping, TouchEvent,
};
use crate::transport::TransportState;
use crate::watchdog::Watchdog;

const MAX_RENDER_FAILURES: u32 = 10;

/// The surface context.
pub struct FusionSession {
    parser: RecordParser,
    engine: FusionEngine,
    canvas: CanvasState,
    watchdog: Watchdog,
    detector: Box<dyn GestureDetector>,
    gesture_mode: bool,
    transport: TransportState,
    exporter: Exporter,
    export_on_exit: bool,
    surface: BackingSurface,
    background: Color,
    consecutive_render_failures: u32,
    should_exit: bool,
}

impl FusionSession {
    /// Builds a session from `config`.
    ///
    /// # Arguments
    /// * `tx` - Sender half of the session's own command queue (for watchdog expiries)
    /// * `runtime` - Tokio runtime handle for the watchdog timer tasks
    pub fn new(
        config: &Config,
        tx: mpsc::UnboundedSender<SurfaceCommand>,
        runtime: Handle,
    ) -> Result<Self> {
        let mapping = SurfaceMapping::new(&config.surface, &config.fusion);
        let surface = BackingSurface::new(config.surface.width, config.surface.height)
            .context("Failed to create backing surface")?;

        debug!("Session configuration:");
        debug!(
            "  Surface: {}x{}",
            config.surface.width, config.surface.height
        );
        debug!(
            "  Force threshold: {:.0}, gap threshold: {:.1}, touch tolerance: {:.1}",
            config.fusion.force_threshold,
            config.fusion.gap_threshold,
            config.fusion.touch_tolerance
        );
        debug!("  Watchdog delay: {}ms", config.watchdog.delay_ms);

        Ok(Self {
            parser: RecordParser::new(&config.protocol),
            engine: FusionEngine::new(mapping, &config.fusion),
            canvas: CanvasState::from_config(config),
            watchdog: Watchdog::new(
                Duration::from_millis(config.watchdog.delay_ms),
                tx,
                runtime,
            ),
            detector: Box::new(NoGestures),
            gesture_mode: false,
            transport: TransportState::None,
            exporter: Exporter::from_config(&config.export),
            export_on_exit: false,
            surface,
            background: config.export.background_color.to_color(),
            consecutive_render_failures: 0,
            should_exit: false,
        })
    }

    pub fn with_detector(mut self, detector: Box<dyn GestureDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_export_dir(mut self, directory: PathBuf) -> Self {
        self.exporter = self.exporter.with_directory(directory);
        self
    }

    pub fn with_export_on_exit(mut self, enabled: bool) -> Self {
        self.export_on_exit = enabled;
        self
    }

    pub fn with_gesture_mode(mut self, enabled: bool) -> Self {
        self.gesture_mode = enabled;
        self
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    pub fn engine(&self) -> &FusionEngine {
        &self.engine
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    pub fn surface_mut(&mut self) -> &mut BackingSurface {
        &mut self.surface
    }

    pub fn gesture_mode(&self) -> bool {
        self.gesture_mode
    }

    pub fn transport_state(&self) -> TransportState {
        self.transport
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Drains the command queue until shutdown.
    ///
    /// Commands that arrived together are applied as one burst, then the
    /// backing surface is re-rendered once if anything invalidated it.
    pub async fn run(&mut self, mut rx: mpsc::UnboundedReceiver<SurfaceCommand>) -> Result<()> {
        info!("Surface loop started");

        while let Some(command) = rx.recv().await {
            self.handle(command);
            while !self.should_exit
                && let Ok(command) = rx.try_recv()
            {
                self.handle(command);
            }

            self.render_if_needed()?;

            if self.should_exit {
                info!("Exit requested, leaving surface loop");
                break;
            }
        }

        info!("Surface loop exiting");
        Ok(())
    }

    /// Applies one command.
    pub fn handle(&mut self, command: SurfaceCommand) {
        match command {
            SurfaceCommand::Batch(lines) => self.on_batch(&lines),
            SurfaceCommand::WatchdogExpired(generation) => self.on_watchdog_expired(generation),
            SurfaceCommand::Gesture(event) => self.on_gesture(&event),
            SurfaceCommand::TransportState(state) => self.on_transport_state(state),
            SurfaceCommand::Clear => {
                self.watchdog.cancel();
                self.engine.reset();
                self.canvas.clear();
            }
            SurfaceCommand::Export => self.export(),
            SurfaceCommand::SetGestureMode(enabled) => self.set_gesture_mode(enabled),
            SurfaceCommand::ToggleGestureMode => self.set_gesture_mode(!self.gesture_mode),
            SurfaceCommand::Shutdown => self.shutdown(),
        }
    }

    fn on_batch(&mut self, lines: &[String]) {
        if self.transport != TransportState::Connected {
            debug!(
                "Dropping batch of {} line(s) while transport is {}",
                lines.len(),
                self.transport
            );
            return;
        }

        let mut valid: Option<InputSample> = None;
        let mut valid_count = 0usize;
        for line in lines {
            if let Some(event) = self.detector.feed(line) {
                self.on_gesture(&event);
            }
            let sample = self.parser.parse(line);
            if sample.is_valid() {
                valid_count += 1;
                valid = Some(sample);
            }
        }

        if self.gesture_mode {
            // Records only feed gesture recognition
            return;
        }
        match (valid_count, valid) {
            (1, Some(sample)) => self.forward(&sample),
            (0, _) => {}
            (n, _) => debug!("Batch held {} valid samples, ignoring it", n),
        }
    }

    /// Sends one sample through the watchdog and the fusion engine.
    fn forward(&mut self, sample: &InputSample) {
        match sample.event {
            TouchEvent::Start | TouchEvent::Move => self.watchdog.reset(),
            TouchEvent::End => self.watchdog.cancel(),
            TouchEvent::Invalid => return,
        }

        for command in self.engine.on_sample(sample) {
            self.canvas.apply(command);
        }
    }

    fn on_watchdog_expired(&mut self, generation: u64) {
        if !self.watchdog.claim(generation) {
            return;
        }
        if let Some(command) = self.engine.synthesize_end() {
            debug!("No END within {:?}, closing stroke", self.watchdog.delay());
            self.canvas.apply(command);
        }
    }

    fn on_gesture(&mut self, event: &GestureEvent) {
        if !self.canvas.on_gesture(event) {
            debug!("Gesture {} ({:?}) has no shortcut", event.direction, event.fingers);
        }
    }

    fn on_transport_state(&mut self, state: TransportState) {
        if state == self.transport {
            return;
        }
        info!("Transport {} -> {}", self.transport, state);
        let was_connected = self.transport == TransportState::Connected;
        self.transport = state;
        if was_connected {
            self.close_stroke();
        }
    }

    fn set_gesture_mode(&mut self, enabled: bool) {
        if enabled == self.gesture_mode {
            return;
        }
        info!(
            "Gesture mode {}",
            if enabled { "enabled" } else { "disabled" }
        );
        self.gesture_mode = enabled;
        if enabled {
            self.close_stroke();
        }
    }

    /// Cancels the watchdog and commits any open stroke.
    fn close_stroke(&mut self) {
        self.watchdog.cancel();
        if let Some(command) = self.engine.synthesize_end() {
            self.canvas.apply(command);
        }
    }

    fn export(&mut self) {
        match self.exporter.export(
            &self.canvas.history,
            self.canvas.stroke_width,
            self.surface.width(),
            self.surface.height(),
        ) {
            Ok(path) => info!("Exported drawing to {}", path.display()),
            Err(e) => error!("Export failed: {}", e),
        }
    }

    fn shutdown(&mut self) {
        info!("Shutting down surface");
        self.close_stroke();
        if self.export_on_exit {
            self.export();
        }
        self.should_exit = true;
    }

    /// Re-renders the backing surface if the canvas was invalidated.
    pub fn render_if_needed(&mut self) -> Result<()> {
        if !self.canvas.needs_redraw {
            return Ok(());
        }

        match self.surface.render(&mut self.canvas, self.background) {
            Ok(()) => {
                self.consecutive_render_failures = 0;
                Ok(())
            }
            Err(e) => {
                self.consecutive_render_failures += 1;
                warn!(
                    "Rendering error (attempt {}/{}): {}",
                    self.consecutive_render_failures, MAX_RENDER_FAILURES, e
                );
                if self.consecutive_render_failures >= MAX_RENDER_FAILURES {
                    return Err(anyhow::anyhow!(
                        "Too many consecutive render failures ({}), exiting: {}",
                        self.consecutive_render_failures,
                        e
                    ));
                }
                // Clear redraw flag to avoid an error loop
                self.canvas.needs_redraw = false;
                Ok(())
            }
        }
    }
}
