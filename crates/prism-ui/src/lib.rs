//! Prism gallery: a sidebar of five GPU demo screens on top of `prism-engine`.
//!
//! ```rust,ignore
//! use prism_ui::Application;
//!
//! Application::new()
//!     .asset_dir("assets")
//!     .env_overrides()
//!     .run()?;
//! ```

pub mod app;
pub mod assets;
pub mod config;
pub mod demo;
pub mod demos;
pub mod layout;
pub mod master;
pub mod sidebar;

pub use app::Application;
pub use assets::{AssetError, Assets};
pub use config::GalleryConfig;
pub use demo::{Demo, DemoEnv, DemoKind};
