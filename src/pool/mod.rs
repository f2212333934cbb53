pub mod clmm_pool;
pub mod swap;
pub mod tick_list;
