//! Output writers for detection results

mod product;
mod table;

pub use product::{
    failure_product, product_json, write_product_json, MessageKind, Product, StatusMessage,
};
pub use table::{render_peak_table, write_peak_table, NO_PEAK_MARKER};
