pub mod access_restricted;
pub mod api_utils;
pub mod icons;
pub mod page_frame;
