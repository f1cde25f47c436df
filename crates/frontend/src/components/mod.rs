pub mod action_button;
pub mod confirm_dialog;
pub mod header;
pub mod map_view;
pub mod point_list;
