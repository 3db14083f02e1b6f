use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Names of the content documents. One document backs one page or shared section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum PageName {
    Home,
    About,
    Mission,
    Management,
    Gallery,
    Service,
    Project,
    Resources,
    Workforce,
    Layout,
    Ehs,
    Certificate,
    Contact,
    Career,
}

impl PageName {
    pub const ALL: [PageName; 14] = [
        PageName::Home,
        PageName::About,
        PageName::Mission,
        PageName::Management,
        PageName::Gallery,
        PageName::Service,
        PageName::Project,
        PageName::Resources,
        PageName::Workforce,
        PageName::Layout,
        PageName::Ehs,
        PageName::Certificate,
        PageName::Contact,
        PageName::Career,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageName::Home => "homepage",
            PageName::About => "aboutpage",
            PageName::Mission => "missionpage",
            PageName::Management => "managementpage",
            PageName::Gallery => "gallerypage",
            PageName::Service => "servicepage",
            PageName::Project => "projectpage",
            PageName::Resources => "resourcespage",
            PageName::Workforce => "workforcepage",
            PageName::Layout => "layout",
            PageName::Ehs => "ehspage",
            PageName::Certificate => "certificatepage",
            PageName::Contact => "contactpage",
            PageName::Career => "careerpage",
        }
    }

    /// `<name>.json`, the on-disk file for this document.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageName::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown page '{s}'"))
    }
}

impl TryFrom<String> for PageName {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PageName> for &'static str {
    fn from(p: PageName) -> Self {
        p.as_str()
    }
}
