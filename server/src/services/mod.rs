//! Domain services behind the HTTP routes.
//!
//! DESIGN
//! ======
//! Routes stay thin: they extract, call one service function, and map the
//! service error to a status code.

pub mod cache;
pub mod pins;
pub mod session;
