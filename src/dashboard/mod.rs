//! Dashboard glue: the client half of the push channel.
//!
//! [`StatusRenderer`] turns `status_update` and `coord_update` frames
//! into text and visibility changes; [`FormToggler`] shows the advanced
//! pointing form. Both work on handles resolved once through an
//! [`ElementLookup`]. [`MemoryDom`] is the in-process implementation used
//! by `pointing-monitor` and the tests.

pub mod decode;
pub mod form_toggle;
pub mod memory;
pub mod status_renderer;
pub mod view;

pub use decode::{CoordUpdate, DashboardError, PushFrame, StatusUpdate};
pub use form_toggle::FormToggler;
pub use memory::{MemoryDom, MemoryElement};
pub use status_renderer::{RendererState, StatusRenderer};
pub use view::{CheckboxHandle, DisplayMode, ElementLookup, PanelHandle, TextHandle, ids};
