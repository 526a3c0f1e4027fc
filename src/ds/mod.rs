pub mod splay;

pub use splay::SplayTree;
