pub mod color;
pub mod loader;
pub mod schema;

pub use color::{HexColor, InvalidColor};
pub use loader::{load_from_path, load_from_str, ConfigError};
pub use schema::{
    ConfigFile, Configuration, Mode, Platform, RawConfiguration, ValidationError,
    ValidationIssue,
};
