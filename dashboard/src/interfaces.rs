//! Interface listing and selection menus

use netsentry_common::{ApiResult, Backend};

/// Fetch the interface list once, in server order
pub async fn load_interfaces(backend: &dyn Backend) -> ApiResult<Vec<String>> {
    let names = backend.interfaces().await?;
    tracing::info!("Loaded {} interfaces", names.len());
    Ok(names)
}

/// A selection control listing interfaces
///
/// Like a drop-down, the first option becomes selected as soon as there is
/// one. Names are kept as given, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct InterfaceMenu {
    options: Vec<String>,
    selected: Option<usize>,
}

impl InterfaceMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one option per name
    pub fn populate(&mut self, names: &[String]) {
        self.options.extend(names.iter().cloned());
        if self.selected.is_none() && !self.options.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Currently selected interface, if any
    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Select by name; false when no option matches
    pub fn select(&mut self, name: &str) -> bool {
        match self.options.iter().position(|o| o == name) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.options.len() => i + 1,
            _ => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.options.len() - 1,
            Some(i) => i - 1,
        });
    }
}
