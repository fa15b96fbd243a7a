use camino::Utf8PathBuf;
use url::Url;

/// The backend a fresh install talks to.
pub fn default_api_url() -> Url {
    Url::parse("http://127.0.0.1:8000").expect("valid default url")
}

/// Where the durable customization store lives.
pub fn customization_store_path() -> Utf8PathBuf {
    let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    Utf8PathBuf::from_path_buf(base.join("mensactl/customizations.json"))
        .unwrap_or_else(|_| Utf8PathBuf::from("mensactl-customizations.json"))
}
