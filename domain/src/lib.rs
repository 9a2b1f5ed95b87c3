//! Business logic for the comment sentiment site.
//!
//! The `web` layer only parses requests and shapes responses; everything it
//! answers with is derived here, either from the collaborators in [`gateway`]
//! or from pure transformations such as [`timeline`] and [`summary`].

pub mod contact;
pub mod error;
pub mod gateway;
pub mod insights;
pub mod route_access;
pub mod sentiment;
pub mod session;
pub mod summary;
pub mod timeline;
