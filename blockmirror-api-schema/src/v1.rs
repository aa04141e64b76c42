pub mod error;
pub mod page_blocks;
