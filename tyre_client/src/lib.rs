//! Browser side of the Tyre visitor site: contact form submission, ui
//! preferences, localized page text and points of interest.
//!
//! The `tyre` binary drives [`controller`] through `contact send --lang` and
//! [`preferences`], [`render`] and [`places`] through `page`.

pub mod client;
pub mod controller;
pub mod form;
pub mod i18n;
pub mod places;
pub mod preferences;
pub mod render;
