// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use anyhow::anyhow;
    use api::prefs::theme_preference::KeyValueStore;
    use api::ApiError;
    use web_sys::Storage;

    /// `window.localStorage`.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct PreferenceStore;

    fn local_storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    impl KeyValueStore for PreferenceStore {
        fn get(&self, key: &str) -> Option<String> {
            local_storage()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), ApiError> {
            let storage = local_storage().ok_or_else(|| anyhow!("localStorage is unavailable"))?;
            storage
                .set_item(key, value)
                .map_err(|e| anyhow!("localStorage write failed: {:?}", e))
        }
    }

    pub fn prefers_dark() -> bool {
        web_sys::window()
            .and_then(|win| win.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }

    /// Adds or removes `class` on `<body>`.
    pub fn set_body_class(class: &str, on: bool) {
        let Some(body) = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.body())
        else {
            return;
        };

        let classes = body.class_list();
        let _ = if on {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use api::prefs::theme_preference::KeyValueStore;
    use api::ApiError;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    /// A small JSON object of string settings, stored in the platform config
    /// directory (e.g. `~/.config/coffee-converter/prefs.json`).
    #[derive(Clone, Debug)]
    pub struct PreferenceStore {
        path: PathBuf,
    }

    impl PreferenceStore {
        pub fn at(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// A missing or unreadable file reads as empty.
        fn read_all(&self) -> HashMap<String, String> {
            fs::read_to_string(&self.path)
                .ok()
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_default()
        }
    }

    impl Default for PreferenceStore {
        fn default() -> Self {
            let dir = dirs::config_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("coffee-converter");
            Self::at(dir.join("prefs.json"))
        }
    }

    impl KeyValueStore for PreferenceStore {
        fn get(&self, key: &str) -> Option<String> {
            self.read_all().remove(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), ApiError> {
            let mut all = self.read_all();
            all.insert(key.to_string(), value.to_string());

            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, serde_json::to_string_pretty(&all)?)?;
            Ok(())
        }
    }

    /// There is no portable OS query for this, so the desktop build reads
    /// `PREFERS_DARK` ("true" or "1").
    pub fn prefers_dark() -> bool {
        std::env::var("PREFERS_DARK")
            .map(|val| val.eq_ignore_ascii_case("true") || val == "1")
            .unwrap_or(false)
    }

    /// The desktop webview styles the app root only.
    pub fn set_body_class(_class: &str, _on: bool) {}

}
