use api::prefs::converter_prefs::ConverterPrefs;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub struct AppStateData {
    pub prefs: ConverterPrefs,
}

/// Settings that are fixed for the lifetime of the app.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(prefs: ConverterPrefs) -> Self {
        Self(Arc::new(AppStateData { prefs }))
    }
}
