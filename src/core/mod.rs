//! Core services and infrastructure

pub mod error_handling;
pub mod logging;
pub mod shutdown;
pub mod styles; // palette shared by CLI help, banners and tables
pub mod validation;
pub mod version;
