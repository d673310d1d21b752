//! # rembg
//!
//! Browser-independent model of the rembg web front-end.
//!
//! The page itself lives in the `rembg_web` crate (Leptos, wasm32). Everything
//! that decides *what* the page does lives here so it can be tested on the
//! host:
//!
//! - [`api`]: wire types for the background-removal service and the auth
//!   backend, plus response parsing
//! - [`session`]: guest vs. signed-in state, the download tier it implies, and
//!   restoring it from a stored token
//! - [`auth`]: the login and register request sequence
//! - [`download`]: what a download button click resolves to
//! - [`batch`]: the pending batch file list
//! - [`image`]: processed image descriptors and output file naming
//! - [`theme`]: light/dark preference resolution
//! - [`forms`]: login/register form validation
//! - [`config`]: endpoints and storage keys
//!
//! ## Quick Start
//!
//! ```
//! use rembg::prelude::*;
//!
//! let cfg = AppConfig::default();
//! let session = Session::Guest;
//! let size = SizeType::default_for(&session);
//! assert_eq!(cfg.remove_bg_url(size), "/api/remove-bg?size=reduced");
//! ```

#[path = "core/api.rs"]
pub mod api;

#[path = "core/auth.rs"]
pub mod auth;

#[path = "core/batch.rs"]
pub mod batch;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/download.rs"]
pub mod download;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/forms.rs"]
pub mod forms;

#[path = "core/image.rs"]
pub mod image;

#[path = "core/session.rs"]
pub mod session;

#[path = "core/size.rs"]
pub mod size;

#[path = "core/theme.rs"]
pub mod theme;

pub use error::ApiError;

/// Convenient re-exports for the web crate and tests.
pub mod prelude {
    pub use crate::api::{AuthUser, BatchItem, UserRecord};
    pub use crate::auth::{AuthFlow, AuthStep};
    pub use crate::batch::BatchQueue;
    pub use crate::config::AppConfig;
    pub use crate::download::{
        plan_batch_download, plan_single_download, BatchDownload, SingleDownload,
    };
    pub use crate::error::{ApiError, FormError};
    pub use crate::forms::{LoginForm, RegisterForm};
    pub use crate::image::{BatchOutcome, CurrentImage, ProcessedImage};
    pub use crate::session::{DownloadTier, Session};
    pub use crate::size::SizeType;
    pub use crate::theme::Theme;
}
