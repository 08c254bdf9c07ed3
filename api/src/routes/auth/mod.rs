//! Authentication route handlers
//!
//! This module contains the authentication endpoints:
//! - Login (throttled per client address)
//! - Account registration (admin only)

pub mod login;
pub mod register;

pub use login::login;
pub use register::register;
