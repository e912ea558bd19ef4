//! ES5 transforms.
//!
//! Each transform reads the arena and records text edits; none of them
//! mutate the tree.

pub mod destructuring_es5;
pub mod for_of_es5;
