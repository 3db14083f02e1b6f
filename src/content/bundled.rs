use super::PageName;

/// Raw JSON for the documents compiled into the binary.
pub fn source(page: PageName) -> &'static str {
    match page {
        PageName::Home => include_str!("../../content/homepage.json"),
        PageName::About => include_str!("../../content/aboutpage.json"),
        PageName::Mission => include_str!("../../content/missionpage.json"),
        PageName::Management => include_str!("../../content/managementpage.json"),
        PageName::Gallery => include_str!("../../content/gallerypage.json"),
        PageName::Service => include_str!("../../content/servicepage.json"),
        PageName::Project => include_str!("../../content/projectpage.json"),
        PageName::Resources => include_str!("../../content/resourcespage.json"),
        PageName::Workforce => include_str!("../../content/workforcepage.json"),
        PageName::Layout => include_str!("../../content/layout.json"),
        PageName::Ehs => include_str!("../../content/ehspage.json"),
        PageName::Certificate => include_str!("../../content/certificatepage.json"),
        PageName::Contact => include_str!("../../content/contactpage.json"),
        PageName::Career => include_str!("../../content/careerpage.json"),
    }
}
