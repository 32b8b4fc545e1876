//! UI components built with Leptos.
//!
//! - [`router`] - Hash routing and the login-state route guard
//! - [`login`] - Sign-in page
//! - [`dashboard`] - Share list with toolbar, cards and pagination
//! - [`shell`] - Header and footer around every page
//! - [`toast`] - Transient notifications
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod dashboard;
pub mod icons;
pub mod login;
pub mod router;
pub mod shell;
pub mod toast;

pub use router::AppRouter;
pub use shell::{Footer, Header};
pub use toast::Toasts;
