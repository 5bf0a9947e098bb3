//! Editor session: the single base image, live caption state and preview notifications.

pub mod editor;
pub mod sink;
