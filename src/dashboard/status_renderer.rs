//! Status panel state machine.
//!
//! Projects push frames onto five bound elements:
//!
//! | Frame                          | Effect                                         |
//! |--------------------------------|------------------------------------------------|
//! | `status_update`, `POINTING`    | show panel, `Target: {target}`                 |
//! | `status_update`, anything else | hide panel, clear alt/az                       |
//! | `status_update`, any           | status line: `Established` or the raw status   |
//! | `coord_update` while pointing  | `ALT: {alt}°`, `AZ: {az}°`                     |
//! | `coord_update` while hidden    | nothing                                        |
//! | `connect`                      | logged                                         |

use super::decode::{CoordUpdate, DashboardError, PushFrame, StatusUpdate};
use super::view::{DisplayMode, ElementLookup, PanelHandle, TextHandle, ids};

/// Renderer state. The content panel is visible only in `Pointing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererState {
    /// Not pointing; coordinates are discarded.
    #[default]
    Hidden,
    /// Pointing at a target; coordinates are shown.
    Pointing,
}

/// Drives the status panel from push frames.
#[derive(Debug)]
pub struct StatusRenderer<P, T> {
    panel: P,
    status_text: T,
    alt: T,
    az: T,
    target: T,
    state: RendererState,
}

impl<P: PanelHandle, T: TextHandle> StatusRenderer<P, T> {
    /// Binds the five status elements once and hides the panel.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MissingElements`] naming every absent id.
    /// The error is also logged.
    pub fn bind<L>(lookup: &L) -> Result<Self, DashboardError>
    where
        L: ElementLookup<Panel = P, Text = T>,
    {
        let panel = lookup.panel(ids::CONTENT_PANEL);
        let status_text = lookup.text(ids::STATUS_TEXT);
        let alt = lookup.text(ids::ALTITUDE);
        let az = lookup.text(ids::AZIMUTH);
        let target = lookup.text(ids::TARGET);

        match (panel, status_text, alt, az, target) {
            (Some(panel), Some(status_text), Some(alt), Some(az), Some(target)) => {
                panel.set_display(DisplayMode::None);
                Ok(Self {
                    panel,
                    status_text,
                    alt,
                    az,
                    target,
                    state: RendererState::Hidden,
                })
            }
            (panel, status_text, alt, az, target) => {
                let missing: Vec<String> = [
                    (ids::CONTENT_PANEL, panel.is_none()),
                    (ids::STATUS_TEXT, status_text.is_none()),
                    (ids::ALTITUDE, alt.is_none()),
                    (ids::AZIMUTH, az.is_none()),
                    (ids::TARGET, target.is_none()),
                ]
                .into_iter()
                .filter_map(|(id, absent)| absent.then(|| id.to_string()))
                .collect();
                tracing::error!(?missing, "status panel elements not found");
                Err(DashboardError::MissingElements(missing))
            }
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> RendererState {
        self.state
    }

    /// Decodes one text frame and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MalformedEvent`] for frames that fail to
    /// decode; the view is left untouched.
    pub fn handle_frame(&mut self, frame: &str) -> Result<(), DashboardError> {
        let frame = PushFrame::decode(frame)?;
        self.apply(&frame);
        Ok(())
    }

    /// Applies a decoded frame.
    pub fn apply(&mut self, frame: &PushFrame) {
        match frame {
            PushFrame::Connect => tracing::info!("connected to server"),
            PushFrame::StatusUpdate(update) => self.on_status(update),
            PushFrame::CoordUpdate(coords) => self.on_coords(*coords),
        }
    }

    fn on_status(&mut self, update: &StatusUpdate) {
        match (update.is_pointing(), update.target.as_deref()) {
            (true, Some(target)) => {
                self.state = RendererState::Pointing;
                self.panel.set_display(DisplayMode::Flex);
                self.target.set_text(&format!("Target: {target}"));
            }
            _ => {
                self.state = RendererState::Hidden;
                self.panel.set_display(DisplayMode::None);
                self.alt.set_text("");
                self.az.set_text("");
            }
        }

        let line = if update.established {
            "Established"
        } else {
            update.status.as_str()
        };
        self.status_text.set_text(line);
    }

    fn on_coords(&self, coords: CoordUpdate) {
        if self.state == RendererState::Hidden {
            return;
        }
        self.alt.set_text(&format!("ALT: {}°", coords.alt));
        self.az.set_text(&format!("AZ: {}°", coords.az));
    }
}
