//! Typed view handles.
//!
//! The dashboard never touches a document directly: every element it
//! drives is resolved once through an [`ElementLookup`] and kept as a
//! handle. Handles use interior mutability, like DOM references.

/// Element ids the dashboard binds to.
pub mod ids {
    /// Advanced pointing settings form.
    pub const ADVANCED_FORM: &str = "advanced-form";
    /// Checkbox that shows or hides [`ADVANCED_FORM`].
    pub const ADVANCED_MODE_CHECKBOX: &str = "checkbox-advanced-mode";
    /// Content panel shown while pointing.
    pub const CONTENT_PANEL: &str = "obj-content";
    /// Status line.
    pub const STATUS_TEXT: &str = "status-text";
    /// Altitude readout.
    pub const ALTITUDE: &str = "alt";
    /// Azimuth readout.
    pub const AZIMUTH: &str = "az";
    /// Target label.
    pub const TARGET: &str = "target";
}

/// CSS-style display of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Visible, laid out as a flex container.
    #[default]
    Flex,
    /// Not rendered.
    None,
}

/// A container whose visibility can be toggled.
pub trait PanelHandle {
    /// Sets the display mode.
    fn set_display(&self, mode: DisplayMode);
    /// Returns the current display mode.
    fn display(&self) -> DisplayMode;
}

/// An element with replaceable text content.
pub trait TextHandle {
    /// Replaces the text content.
    fn set_text(&self, text: &str);
}

/// A checkbox input.
pub trait CheckboxHandle {
    /// Whether the box is currently checked.
    fn is_checked(&self) -> bool;
}

/// Resolves element ids to typed handles.
pub trait ElementLookup {
    /// Handle type for panels.
    type Panel: PanelHandle;
    /// Handle type for text elements.
    type Text: TextHandle;
    /// Handle type for checkboxes.
    type Checkbox: CheckboxHandle;

    /// Looks up a panel by id.
    fn panel(&self, id: &str) -> Option<Self::Panel>;
    /// Looks up a text element by id.
    fn text(&self, id: &str) -> Option<Self::Text>;
    /// Looks up a checkbox by id.
    fn checkbox(&self, id: &str) -> Option<Self::Checkbox>;
}
