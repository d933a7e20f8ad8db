//! Renderer plugins and selection export.
//!
//! Plugins attach through the `ChartPlugin` hooks and never reach into
//! renderer internals.

mod export;
mod plugins;
mod selection_overlay;
mod zoom_sync;

pub use export::{ExportFormat, ExportOptions, export_selected_data};
pub use plugins::{ChartPlugin, PluginContext, ScaleChange};
pub use selection_overlay::{SELECTION_OVERLAY_PLUGIN_ID, SelectionOverlayPlugin};
pub use zoom_sync::{ZOOM_SYNC_PLUGIN_ID, ZoomSyncPlugin};
