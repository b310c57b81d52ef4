//! Post-processing of finished lattices: block-scale aggregation and
//! link-based segregation indices.

pub mod links;
pub mod scale;

pub use links::{count_links, link_index};
pub use scale::{auto_scale, scale_data, scale_data_wrapped, scaling_index, std_dev, Field};
