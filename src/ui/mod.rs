//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled output through
//! composable rendering components.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`format`]: Population and fetch-age formatting
//! - [`theme`]: Light and dark color schemes and ANSI escape generation

pub mod components;
pub mod format;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use format::PopulationFormatter;
pub use renderer::render;
pub use theme::{Theme, ThemeKind};
pub use viewmodel::{
    BorderItem, Body, CardItem, DetailView, EmptyKind, EmptyState, FooterInfo, HeaderInfo,
    SearchBarInfo, UIViewModel,
};
