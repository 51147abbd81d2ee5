//! Shared application services for brickshelf frontends: the settings file
//! and the managed image directory.

pub mod images;
pub mod settings;

pub use images::{ImageError, ImageLibrary, image_file_name, sanitize_code};
pub use settings::{
    AppSettings, LibrarySettings, ViewSettings, load_settings, load_settings_from,
    load_settings_string, resolve_database_path, resolve_image_dir, save_settings,
    save_settings_to, settings_path,
};
