//! XML utilities for navigating Formex DOM trees.

mod utils;

pub use utils::{element_children, find_by_path, find_child, find_children, get_tag_name};
