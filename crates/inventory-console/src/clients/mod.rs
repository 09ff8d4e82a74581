pub mod category_client;
pub mod page_client;
pub mod product_client;
pub mod warehouse_client;

pub use category_client::CategoryClient;
pub use page_client::PageClient;
pub use product_client::{ProductClient, ProductListing};
pub use warehouse_client::WarehouseClient;
