//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The OAuth client identifier embedded in authorization URLs.
/// Feel free to override it with your own when initing this library.
pub static CLIENT_ID: Lazy<Arc<Mutex<String>>> = Lazy::new(|| {
    Arc::new(Mutex::new(
        "885469183343-lpr31ui9scfq0oiq5e8s3tba6oejg3br.apps.googleusercontent.com".to_string(),
    ))
});

/// Where the identity provider should redirect the user after login.
/// Feel free to override it when initing this library.
pub static REDIRECT_URI: Lazy<Arc<Mutex<String>>> =
    Lazy::new(|| Arc::new(Mutex::new("http://127.0.0.1:5500/".to_string())));
