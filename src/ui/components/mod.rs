pub mod menu;
pub mod stat_box;
pub mod summary;
pub mod typing_area;
