//! Application pages

mod add_temple;
mod browse;
mod contributions;
mod heritage_map;
mod home;

pub use add_temple::AddTemplePage;
pub use browse::BrowsePage;
pub use contributions::ContributionsPage;
pub use heritage_map::HeritageMapPage;
pub use home::HomePage;

use th_ui::icons;

/// Top-level page shown in the central panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Browse,
    Contributions,
    HeritageMap,
    AddTemple,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Browse,
        Page::Contributions,
        Page::HeritageMap,
        Page::AddTemple,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Browse => "Browse Temples",
            Page::Contributions => "Community Contributions",
            Page::HeritageMap => "Heritage Map",
            Page::AddTemple => "Add Temple",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => icons::TEMPLE,
            Page::Browse => icons::CARDS,
            Page::Contributions => icons::PERSON,
            Page::HeritageMap => icons::MAP,
            Page::AddTemple => icons::UPLOAD,
        }
    }

    /// Title with its icon, used for page headings and navigation buttons
    pub fn heading(&self) -> String {
        format!("{} {}", self.icon(), self.title())
    }
}

/// Buttons leading to the other pages
pub fn navigation_row(ui: &mut egui::Ui, current: Page) -> Option<Page> {
    let mut target = None;
    ui.horizontal(|ui| {
        for page in Page::ALL.into_iter().filter(|page| *page != current) {
            if ui.button(page.heading()).clicked() {
                target = Some(page);
            }
        }
    });
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_titles_are_unique() {
        for (i, a) in Page::ALL.iter().enumerate() {
            for b in &Page::ALL[i + 1..] {
                assert_ne!(a.title(), b.title());
            }
        }
    }

    #[test]
    fn test_heading_carries_icon() {
        assert_eq!(Page::HeritageMap.heading(), format!("{} Heritage Map", icons::MAP));
    }
}
