use super::*;

/// # Safety
/// Only the single env test below touches these variables.
unsafe fn clear_client_env() {
    unsafe {
        std::env::remove_var(API_URL_ENV);
        std::env::remove_var(TOKEN_FILE_ENV);
    }
}

#[test]
fn from_env_defaults_then_overrides() {
    unsafe { clear_client_env() };

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.base_url, DEFAULT_API_URL);
    assert!(cfg.token_file.ends_with(".smartmarket/storage.json"));

    unsafe {
        std::env::set_var(API_URL_ENV, "https://api.example.test/");
        std::env::set_var(TOKEN_FILE_ENV, "/tmp/sm-token.json");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.base_url, "https://api.example.test");
    assert_eq!(cfg.token_file, PathBuf::from("/tmp/sm-token.json"));

    unsafe {
        std::env::set_var(API_URL_ENV, "   ");
    }
    assert_eq!(ClientConfig::from_env().base_url, DEFAULT_API_URL);

    unsafe { clear_client_env() };
}

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ClientConfig::new("http://127.0.0.1:9000///", "token.json");
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
}

#[test]
fn default_points_at_local_backend() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.base_url, "http://localhost:8000");
}
