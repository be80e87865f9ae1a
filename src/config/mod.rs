pub mod types;
pub mod resources;
pub mod validator;
pub mod registry;
pub mod settings;

pub use types::*;
pub use validator::*;
pub use registry::*;
pub use settings::*;
