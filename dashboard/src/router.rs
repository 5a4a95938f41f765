//! Page routing
//!
//! Exactly one page is active at a time; the sidebar highlight follows it.

use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Introduce,
    Traffic,
    Alerts,
    Packets,
    ErrorPackets,
    Rules,
}

impl Page {
    /// Sidebar order
    pub const ALL: [Page; 6] = [
        Page::Introduce,
        Page::Traffic,
        Page::Alerts,
        Page::Packets,
        Page::ErrorPackets,
        Page::Rules,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Page::Introduce => "introduce",
            Page::Traffic => "traffic",
            Page::Alerts => "alerts",
            Page::Packets => "packets",
            Page::ErrorPackets => "error-packets",
            Page::Rules => "rules",
        }
    }

    /// Sidebar label
    pub fn title(self) -> &'static str {
        match self {
            Page::Introduce => "Introduction",
            Page::Traffic => "Traffic",
            Page::Alerts => "IDS Alerts",
            Page::Packets => "Packets",
            Page::ErrorPackets => "Error Packets",
            Page::Rules => "Rules",
        }
    }

    fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = DashboardError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.id() == id)
            .ok_or_else(|| DashboardError::UnknownPage(id.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct PageRouter {
    active: Page,
}

impl Default for PageRouter {
    fn default() -> Self {
        Self {
            active: Page::Introduce,
        }
    }
}

impl PageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the page with the given id
    ///
    /// An unknown id fails this call only; the active page stays as it was.
    pub fn show_page(&mut self, id: &str) -> Result<(), DashboardError> {
        let page = id.parse()?;
        self.show(page);
        Ok(())
    }

    pub fn show(&mut self, page: Page) {
        if self.active != page {
            tracing::debug!("page: {} -> {}", self.active, page);
        }
        self.active = page;
    }

    pub fn active(&self) -> Page {
        self.active
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.active == page
    }

    pub fn next(&mut self) {
        let index = (self.active.index() + 1) % Page::ALL.len();
        self.show(Page::ALL[index]);
    }

    pub fn previous(&mut self) {
        let len = Page::ALL.len();
        let index = (self.active.index() + len - 1) % len;
        self.show(Page::ALL[index]);
    }
}
