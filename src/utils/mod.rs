pub mod logging;
pub mod media;
