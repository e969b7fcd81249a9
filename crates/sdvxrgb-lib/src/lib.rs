//! sdvxrgb: hot-reloadable per-strip color transforms for SDVX tape LED data.

pub mod capture;
pub mod color;
pub mod error;
pub mod ini;
pub mod layout;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod pixel;
pub mod profiles;
pub mod reload;
pub mod settings;
pub mod source;

pub use error::SdvxRgbError;
