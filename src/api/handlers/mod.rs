//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod export;
pub mod links;
pub mod meta;
pub mod redirect;
pub mod stats;

pub use export::{export_clicks_handler, export_links_handler};
pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
pub use meta::{csrf_token_handler, not_found_handler, service_info_handler};
pub use redirect::redirect_handler;
pub use stats::{link_stats_handler, overview_handler};
