pub mod page_blocks;
