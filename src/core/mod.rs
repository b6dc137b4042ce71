//! Core browsing state: filter/paginate controller, query debouncing,
//! and the icon style variants.

pub mod debounce;
pub mod style;
pub mod view;

pub use style::IconStyle;
pub use view::{INITIAL_VISIBLE, IconView, VISIBLE_INCREMENT, compute_filtered};
