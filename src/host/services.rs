use crate::core::numeric::DataWarning;
use crate::dataview::SelectionKey;
use crate::host::format::LocaleSettings;

/// Host environment flags and locale handed to each conversion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostCapabilities {
    pub allow_interactions: bool,
    pub locale: LocaleSettings,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            allow_interactions: true,
            locale: LocaleSettings::default(),
        }
    }
}

/// Host services surface for warnings and interaction callbacks.
///
/// The converters themselves stay pure and carry their warning in the
/// returned data; `surface_warning` forwards it here after conversion.
pub trait VisualHost {
    fn set_warnings(&mut self, warnings: &[DataWarning]);
    fn on_select(&mut self, keys: &[SelectionKey]);
    fn on_context_menu(&mut self, key: &SelectionKey, position: (f64, f64));
}

/// Pushes a conversion warning (or clears warnings) on the host.
pub fn surface_warning(host: &mut dyn VisualHost, warning: Option<DataWarning>) {
    match warning {
        Some(warning) => host.set_warnings(&[warning]),
        None => host.set_warnings(&[]),
    }
}

/// No-op host used by tests and headless conversion.
///
/// It records every call so tests can assert on the warning and interaction
/// traffic without a live host.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub warnings: Vec<Vec<DataWarning>>,
    pub selections: Vec<Vec<SelectionKey>>,
    pub context_menus: Vec<(SelectionKey, (f64, f64))>,
}

impl VisualHost for RecordingHost {
    fn set_warnings(&mut self, warnings: &[DataWarning]) {
        self.warnings.push(warnings.to_vec());
    }

    fn on_select(&mut self, keys: &[SelectionKey]) {
        self.selections.push(keys.to_vec());
    }

    fn on_context_menu(&mut self, key: &SelectionKey, position: (f64, f64)) {
        self.context_menus.push((key.clone(), position));
    }
}
