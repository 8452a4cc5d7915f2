//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod redirect;
pub mod urls;
pub mod users;

pub use auth::{login_handler, refresh_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use urls::{
    create_url_handler, delete_url_handler, get_url_handler, inspect_url_handler,
    url_history_handler,
};
pub use users::{
    change_password_handler, delete_profile_image_handler, my_account_handler, my_urls_handler,
    sign_out_handler, sign_up_handler, upload_profile_image_handler,
};
