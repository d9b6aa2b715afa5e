use iced::widget::{button, canvas, column, container, pick_list, row, slider, text, Column, Row};
use iced::{Alignment, Element, Length, Point, Task, Theme};
use rfd::{FileDialog, MessageDialog, MessageLevel};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::CropperConfig;
use crate::error::CropperError;
use crate::photo::loader::{content_type_for, is_image_content_type};
use crate::photo::{self, ImageAsset};
use crate::state::layout::LayoutIntent;
use crate::state::transform::zoom_label;
use crate::state::{LoadOutcome, LoadTicket, PositioningTool};
use crate::ui::{MasterCanvas, SurfaceCanvas};

/// Extensions offered first in the file picker
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff"];

/// Main application state
pub struct PhotoCropper {
    /// The positioning tool (owns photo, transform and previews)
    tool: PositioningTool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Choose photo"
    PickPhoto,
    /// Background decode finished for the load identified by the ticket
    PhotoLoaded(LoadTicket, Result<ImageAsset, Arc<CropperError>>),
    /// Zoom slider moved
    ZoomChanged(f32),
    /// Position type changed on the form
    IntentSelected(LayoutIntent),
    /// Pointer or finger pressed over the master preview
    PointerPressed(Point),
    /// Pointer or finger moved during a drag
    PointerMoved(Point),
    /// Pointer released, finger lifted or cursor left the window
    PointerReleased,
    /// User clicked "Reset"
    Reset,
    /// User clicked "Apply changes"
    Apply,
}

impl PhotoCropper {
    /// Create a new instance of the application
    pub fn new(config: CropperConfig) -> (Self, Task<Message>) {
        let tool = PositioningTool::new(config);

        let status = if tool.is_enabled() {
            "Choose a photo to position.".to_string()
        } else {
            "Photo positioning is unavailable; the photo will be uploaded as-is.".to_string()
        };

        (PhotoCropper { tool, status }, Task::none())
    }

    pub fn tool(&self) -> &PositioningTool {
        &self.tool
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickPhoto => {
                // Show the native file picker
                let picked = FileDialog::new()
                    .set_title("Select a staff photo")
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .add_filter("All files", &["*"])
                    .pick_file();

                match picked {
                    Some(path) => self.start_load(path),
                    None => Task::none(),
                }
            }
            Message::PhotoLoaded(ticket, result) => {
                let failure = result.as_ref().err().cloned();

                match self.tool.finish_load(ticket, result) {
                    LoadOutcome::Applied => {
                        self.status = "You can now adjust the photo by zooming and dragging. \
                                       Click \"Apply changes\" when done."
                            .to_string();
                    }
                    LoadOutcome::Failed => {
                        if let Some(err) = failure {
                            self.report(&err);
                        }
                    }
                    LoadOutcome::Stale | LoadOutcome::Disabled => {}
                }

                Task::none()
            }
            Message::ZoomChanged(zoom) => {
                self.tool.set_zoom(zoom);
                Task::none()
            }
            Message::IntentSelected(intent) => {
                self.tool.set_intent(intent);
                Task::none()
            }
            Message::PointerPressed(position) => {
                self.tool.pointer_down(position);
                Task::none()
            }
            Message::PointerMoved(position) => {
                self.tool.pointer_moved(position);
                Task::none()
            }
            Message::PointerReleased => {
                self.tool.pointer_up();
                Task::none()
            }
            Message::Reset => {
                self.tool.reset();
                Task::none()
            }
            Message::Apply => {
                if self.tool.commit().is_some() {
                    self.status = "Photo adjustments applied. You can now save the form.".to_string();
                }
                Task::none()
            }
        }
    }

    /// Validate the picked file and decode it in the background
    fn start_load(&mut self, path: PathBuf) -> Task<Message> {
        if !self.tool.is_enabled() {
            self.status = format!("Selected {} (positioning unavailable).", path.display());
            return Task::none();
        }

        // Reject non-images before touching any state
        let content_type = content_type_for(&path);
        if !is_image_content_type(&content_type) {
            self.report(&CropperError::UnsupportedFileKind { content_type });
            return Task::none();
        }

        let ticket = self.tool.begin_load();
        self.status = format!("Loading {}...", path.display());
        log::info!("Loading photo {} (load #{})", path.display(), ticket.generation());

        Task::perform(
            photo::load_path(path, ticket.generation()),
            move |result| Message::PhotoLoaded(ticket, result.map_err(Arc::new)),
        )
    }

    /// Blocking notice for problems the operator must see
    fn report(&mut self, err: &CropperError) {
        log::warn!("{}", err);
        self.status = format!("⚠️  {}", err);

        if err.is_user_facing() {
            MessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("Photo not loaded")
                .set_description(&err.to_string())
                .show();
        }
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let header = row![
            button("Choose photo")
                .on_press(Message::PickPhoto)
                .padding(10),
            pick_list(
                LayoutIntent::ALL,
                Some(self.tool.intent()),
                Message::IntentSelected,
            ),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let mut content: Column<Message> = column![
            text("Staff Photo").size(32),
            header,
            text(&self.status).size(16),
        ]
        .spacing(20)
        .padding(40);

        if self.tool.is_panel_open() {
            if let Some(panel) = self.cropper_panel() {
                content = content.push(panel);
            }
        }

        content = content.push(self.form_summary());

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Master preview, controls and display-slot previews
    fn cropper_panel(&self) -> Option<Element<Message>> {
        let asset = self.tool.asset()?;
        let render = *self.tool.master_render()?;
        let master = self.tool.master_frame();
        let zoom = self.tool.transform().zoom;
        let range = self.tool.config().zoom;

        let master_view = canvas(MasterCanvas {
            handle: asset.handle().clone(),
            render,
            dragging: self.tool.is_dragging(),
        })
        .width(Length::Fixed(master.width))
        .height(Length::Fixed(master.height));

        let controls = row![
            text("Zoom"),
            slider(range.min..=range.max, zoom, Message::ZoomChanged)
                .step(range.step)
                .width(Length::Fixed(200.0)),
            text(zoom_label(zoom)),
            button("Reset").on_press(Message::Reset),
            button("Apply changes").on_press(Message::Apply),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let previews = Row::with_children(self.tool.previews().visible().map(|surface| {
            let preview = canvas(SurfaceCanvas {
                kind: surface.kind,
                handle: asset.handle().clone(),
                render: surface.render,
            })
            .width(Length::Fixed(surface.frame.width))
            .height(Length::Fixed(surface.frame.height));

            column![preview, text(surface.kind.label()).size(12)]
                .spacing(6)
                .align_x(Alignment::Center)
                .into()
        }))
        .spacing(20);

        Some(
            column![
                text(format!("Positioning {}", asset.file_name)).size(16),
                master_view,
                controls,
                text("Preview").size(16),
                previews,
            ]
            .spacing(16)
            .into(),
        )
    }

    /// What the form will post as `crop_data`
    fn form_summary(&self) -> Element<Message> {
        let crop_data = match self.tool.form().crop_data() {
            Ok(json) => json,
            Err(e) => format!("<unavailable: {}>", e),
        };

        column![
            text("crop_data").size(14),
            text(crop_data).size(12),
        ]
        .spacing(4)
        .into()
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
