/// The positioning tool
///
/// Owns the loaded photo, the transform, the drag state machine and the
/// preview slots, and keeps them consistent: every mutation re-renders the
/// master view and all visible previews. All handlers are no-ops while no
/// photo is loaded or when the tool was disabled at construction.

use iced::Point;
use std::fmt;

use super::interaction::DragController;
use super::layout::{FrameSize, LayoutIntent};
use super::payload::{CropPayload, ProfileForm};
use super::preview::{render_master, PreviewSynchronizer, SurfaceRender};
use super::transform::{init_transform, FitPolicy, Transform};
use crate::config::CropperConfig;
use crate::photo::ImageAsset;

/// Identifies one file load; only the latest ticket may deliver its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What happened to a completed load
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// New photo is active
    Applied,
    /// A newer load was started meanwhile; result dropped
    Stale,
    /// Load failed; the previous photo (if any) stays active
    Failed,
    /// Tool is disabled; nothing was installed
    Disabled,
}

/// Interactive photo positioning tool
#[derive(Debug)]
pub struct PositioningTool {
    config: CropperConfig,
    enabled: bool,
    asset: Option<ImageAsset>,
    transform: Transform,
    initial: Transform,
    intent: LayoutIntent,
    drag: DragController,
    previews: PreviewSynchronizer,
    master_render: Option<SurfaceRender>,
    latest_load: u64,
    form: ProfileForm,
    /// Cropper panel shown; hidden again after commit
    panel_open: bool,
}

impl PositioningTool {
    /// Create the tool. Invalid geometry disables it instead of failing.
    pub fn new(config: CropperConfig) -> Self {
        let enabled = match config.validate() {
            Ok(()) => true,
            Err(e) => {
                log::error!("Photo cropper disabled: {}", e);
                false
            }
        };

        let intent = config.default_intent;
        let previews = PreviewSynchronizer::new(config.surfaces.iter().map(|s| (s.kind, s.frame)), intent);

        if enabled {
            log::info!(
                "Photo cropper ready ({:?}, zoom {}..{})",
                config.fit_policy, config.zoom.min, config.zoom.max
            );
        }

        Self {
            config,
            enabled,
            asset: None,
            transform: Transform::default(),
            initial: Transform::default(),
            intent,
            drag: DragController::new(),
            previews,
            master_render: None,
            latest_load: 0,
            form: ProfileForm {
                position_type: intent,
                ..Default::default()
            },
            panel_open: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn asset(&self) -> Option<&ImageAsset> {
        self.asset.as_ref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn intent(&self) -> LayoutIntent {
        self.intent
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn previews(&self) -> &PreviewSynchronizer {
        &self.previews
    }

    pub fn master_render(&self) -> Option<&SurfaceRender> {
        self.master_render.as_ref()
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Current master frame (depends on the layout in fill-fit mode)
    pub fn master_frame(&self) -> FrameSize {
        self.config.master_frame_for(self.intent)
    }

    // ========== Input acquisition ==========

    /// Start a new load. Any load still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        log::debug!("Starting photo load #{}", self.latest_load);
        LoadTicket(self.latest_load)
    }

    /// Deliver the result of a load started with `ticket`
    pub fn finish_load<E: fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: Result<ImageAsset, E>,
    ) -> LoadOutcome {
        if ticket.0 != self.latest_load {
            log::info!(
                "Dropping result of load #{} (latest is #{})",
                ticket.0, self.latest_load
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(_) if !self.enabled => LoadOutcome::Disabled,
            Ok(asset) => {
                self.install(asset);
                LoadOutcome::Applied
            }
            Err(e) => {
                log::warn!("Photo load #{} failed: {}", ticket.0, e);
                LoadOutcome::Failed
            }
        }
    }

    /// Make `asset` the active photo and fit it
    fn install(&mut self, asset: ImageAsset) {
        log::info!(
            "Positioning {} ({}x{})",
            asset.file_name, asset.size.width, asset.size.height
        );
        self.asset = Some(asset);
        self.drag.release();
        self.form.crop_data.clear();
        self.panel_open = true;
        self.refit();
    }

    // ========== Transform state ==========

    /// Fit the photo again for the current frame and layout
    fn refit(&mut self) {
        let Some(asset) = &self.asset else {
            return;
        };

        let outcome = init_transform(
            asset.size,
            self.master_frame(),
            self.intent,
            self.config.fit_policy,
            &self.config.zoom,
        );
        self.initial = outcome.transform;
        self.transform = outcome.transform;
        self.render();
    }

    /// Slider moved
    pub fn set_zoom(&mut self, value: f32) {
        if !self.enabled || self.asset.is_none() {
            return;
        }
        if self.transform.set_zoom(value, &self.config.zoom) {
            log::debug!("Zoom set to {:.2}", self.transform.zoom);
        }
        self.render();
    }

    /// Restore the transform fitted for the current photo, frame and layout
    pub fn reset(&mut self) {
        if !self.enabled || self.asset.is_none() {
            return;
        }
        log::debug!("Resetting transform");
        self.drag.release();
        self.refit();
    }

    /// The transform `reset` returns to
    pub fn initial_transform(&self) -> &Transform {
        &self.initial
    }

    // ========== Interaction ==========

    /// Pointer pressed (or finger down) over the master preview.
    ///
    /// Returns whether a drag started.
    pub fn pointer_down(&mut self, position: Point) -> bool {
        if !self.enabled {
            return false;
        }
        self.drag.press(position, self.asset.is_some())
    }

    /// Pointer or finger moved; pans while dragging
    pub fn pointer_moved(&mut self, position: Point) {
        if !self.enabled || self.asset.is_none() {
            return;
        }
        if let Some(delta) = self.drag.move_to(position) {
            self.transform.translate_by(delta);
            self.render();
        }
    }

    /// Pointer released, finger lifted or cursor left the window
    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    /// Layout changed on the form
    pub fn set_intent(&mut self, intent: LayoutIntent) {
        let changed = intent != self.intent;
        self.intent = intent;
        self.form.position_type = intent;
        if !self.enabled {
            return;
        }

        self.previews.apply_intent(intent);
        log::debug!("Layout set to {}", intent.as_str());

        match self.config.fit_policy {
            // Target aspect ratio changed: fit again
            FitPolicy::FillFit if changed => self.refit(),
            _ => self.render(),
        }
    }

    // ========== Preview synchronization ==========

    /// Recompute the master view and every visible preview
    fn render(&mut self) {
        let Some(asset) = &self.asset else {
            return;
        };

        let master = self.master_frame();
        self.master_render = Some(render_master(asset.size, &self.transform, master));
        self.previews.render_all(asset.size, &self.transform, master);
    }

    // ========== Commit ==========

    /// Serialize the transform into the hidden form field and close the panel.
    ///
    /// Returns the committed payload, or `None` when there is no photo.
    pub fn commit(&mut self) -> Option<CropPayload> {
        if !self.enabled || self.asset.is_none() {
            return None;
        }

        let payload = CropPayload::capture(
            &self.transform,
            self.master_frame(),
            self.intent,
            self.config.aspect_ratio_for(self.intent),
        );

        match payload.to_json() {
            Ok(json) => {
                log::info!("Crop data applied: {}", json);
                self.form.crop_data.set(json);
                self.panel_open = false;
                Some(payload)
            }
            Err(e) => {
                log::error!("Failed to serialize crop data: {}", e);
                None
            }
        }
    }
}
