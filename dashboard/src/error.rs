//! Dashboard errors
//!
//! User-input problems that abort an action before any request is made.
//! Backend failures use [`netsentry_common::ApiError`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// A feed that needs an interface was started with none selected
    #[error("Please select a network interface.")]
    NoInterfaceSelected,

    /// `show_page` was given an id no page answers to
    #[error("no page with id '{0}'")]
    UnknownPage(String),
}
