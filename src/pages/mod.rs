//! Public site pages: route table, section editors and view models.

pub mod catalog;
pub mod editing;
pub mod view;

use crate::content::PageName;
use crate::inquiry::InquiryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitePage {
    Home,
    About,
    Mission,
    Management,
    Gallery,
    Ehs,
    Certificates,
    Projects,
    Services,
    Plant,
    Resources,
    Contact,
    Career,
    Quote,
    Workforce,
    Feedback,
}

impl SitePage {
    pub const ALL: [SitePage; 16] = [
        SitePage::Home,
        SitePage::About,
        SitePage::Mission,
        SitePage::Management,
        SitePage::Gallery,
        SitePage::Ehs,
        SitePage::Certificates,
        SitePage::Projects,
        SitePage::Services,
        SitePage::Resources,
        SitePage::Plant,
        SitePage::Contact,
        SitePage::Career,
        SitePage::Quote,
        SitePage::Workforce,
        SitePage::Feedback,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            SitePage::Home => "/",
            SitePage::About => "/about",
            SitePage::Mission => "/mission",
            SitePage::Management => "/management",
            SitePage::Gallery => "/gallery",
            SitePage::Ehs => "/ehs",
            SitePage::Certificates => "/certificates",
            SitePage::Projects => "/projects",
            SitePage::Services => "/services",
            SitePage::Plant => "/plant",
            SitePage::Resources => "/resources",
            SitePage::Contact => "/contact",
            SitePage::Career => "/career",
            SitePage::Quote => "/quote",
            SitePage::Workforce => "/workforce",
            SitePage::Feedback => "/feedback",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SitePage::Home => "Home",
            SitePage::About => "About Us",
            SitePage::Mission => "Vision and Mission",
            SitePage::Management => "Our Team",
            SitePage::Gallery => "Gallery",
            SitePage::Ehs => "EHS",
            SitePage::Certificates => "Certificates & Recognition",
            SitePage::Projects => "Projects",
            SitePage::Services => "Services",
            SitePage::Plant => "Plant & Machinery",
            SitePage::Resources => "Tools Plants & Machinery",
            SitePage::Contact => "Contact Us",
            SitePage::Career => "Career",
            SitePage::Quote => "Request a Quote",
            SitePage::Workforce => "Workforce",
            SitePage::Feedback => "Feedback",
        }
    }

    /// Content document the page renders, if it has one.
    pub fn document(&self) -> Option<PageName> {
        match self {
            SitePage::Home => Some(PageName::Home),
            SitePage::About => Some(PageName::About),
            SitePage::Mission => Some(PageName::Mission),
            SitePage::Management => Some(PageName::Management),
            SitePage::Gallery => Some(PageName::Gallery),
            SitePage::Ehs => Some(PageName::Ehs),
            SitePage::Certificates => Some(PageName::Certificate),
            SitePage::Projects => Some(PageName::Project),
            SitePage::Services => Some(PageName::Service),
            SitePage::Plant | SitePage::Resources => Some(PageName::Resources),
            SitePage::Contact => Some(PageName::Contact),
            SitePage::Career => Some(PageName::Career),
            SitePage::Workforce => Some(PageName::Workforce),
            SitePage::Quote | SitePage::Feedback => None,
        }
    }

    pub fn inquiry(&self) -> Option<InquiryKind> {
        match self {
            SitePage::Contact => Some(InquiryKind::Contact),
            SitePage::Career => Some(InquiryKind::Career),
            SitePage::Quote => Some(InquiryKind::Quote),
            SitePage::Feedback => Some(InquiryKind::Feedback),
            _ => None,
        }
    }

    pub fn from_path(path: &str) -> Option<SitePage> {
        Self::ALL.into_iter().find(|p| p.path() == path)
    }

    /// Page whose edit mode governs `doc`. The layout document is edited
    /// from any page, so it has no page of its own.
    pub fn for_document(doc: PageName) -> Option<SitePage> {
        Self::ALL.into_iter().find(|p| p.document() == Some(doc))
    }
}

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

pub struct NavGroup {
    pub label: &'static str,
    pub links: Vec<NavLink>,
}

fn links(pairs: &[(&'static str, &'static str)]) -> Vec<NavLink> {
    pairs.iter().map(|&(href, label)| NavLink { href, label }).collect()
}

/// Main navigation, grouped the way the header menu shows it.
pub fn navigation() -> Vec<NavGroup> {
    vec![
        NavGroup { label: "Home", links: links(&[("/", "Home")]) },
        NavGroup {
            label: "About",
            links: links(&[
                ("/about", "About Us"),
                ("/mission", "Vision and Mission"),
                ("/management", "Our Team"),
                ("/certificates", "Certificates & Recognition"),
                ("/gallery", "Gallery"),
                ("/ehs", "EHS"),
            ]),
        },
        NavGroup { label: "Services", links: links(&[("/services", "Services")]) },
        NavGroup {
            label: "Projects",
            links: links(&[
                ("/projects?type=running", "Running Projects"),
                ("/projects?type=completed", "Completed Projects"),
            ]),
        },
        NavGroup {
            label: "Resources",
            links: links(&[
                ("/resources", "Tools Plants & Machinery"),
                ("/plant", "Plant & Machinery"),
                ("/workforce", "Workforce"),
            ]),
        },
        NavGroup {
            label: "Contact",
            links: links(&[
                ("/contact", "Contact Us"),
                ("/career", "Career"),
                ("/feedback", "Feedback"),
            ]),
        },
    ]
}
