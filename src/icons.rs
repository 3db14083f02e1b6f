/// Icons content documents may name. Anything unrecognised renders as [`Icon::Trophy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    #[default]
    Trophy,
    Headset,
    ShieldCheck,
    Zap,
    Sun,
    Wind,
    Droplet,
    Layers,
    Users,
    TrendingUp,
    Award,
    Settings,
    Truck,
    PenTool,
    Layout,
    Server,
    Shield,
}

/// Names accepted in content, including aliases from older icon sets.
const NAME_TABLE: &[(&str, Icon)] = &[
    ("Trophy", Icon::Trophy),
    ("AiOutlineTrophy", Icon::Trophy),
    ("Headset", Icon::Headset),
    ("MdSupportAgent", Icon::Headset),
    ("ShieldCheck", Icon::ShieldCheck),
    ("BsShieldCheck", Icon::ShieldCheck),
    ("Zap", Icon::Zap),
    ("Sun", Icon::Sun),
    ("Wind", Icon::Wind),
    ("Droplet", Icon::Droplet),
    ("Layers", Icon::Layers),
    ("Users", Icon::Users),
    ("TrendingUp", Icon::TrendingUp),
    ("Award", Icon::Award),
    ("Settings", Icon::Settings),
    ("Truck", Icon::Truck),
    ("PenTool", Icon::PenTool),
    ("Layout", Icon::Layout),
    ("Server", Icon::Server),
    ("Shield", Icon::Shield),
];

impl Icon {
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_default()
    }

    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        NAME_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, icon)| *icon)
    }

    /// Kebab-case class used by the stylesheet, e.g. `icon-shield-check`.
    pub fn css_class(&self) -> &'static str {
        match self {
            Icon::Trophy => "icon-trophy",
            Icon::Headset => "icon-headset",
            Icon::ShieldCheck => "icon-shield-check",
            Icon::Zap => "icon-zap",
            Icon::Sun => "icon-sun",
            Icon::Wind => "icon-wind",
            Icon::Droplet => "icon-droplet",
            Icon::Layers => "icon-layers",
            Icon::Users => "icon-users",
            Icon::TrendingUp => "icon-trending-up",
            Icon::Award => "icon-award",
            Icon::Settings => "icon-settings",
            Icon::Truck => "icon-truck",
            Icon::PenTool => "icon-pen-tool",
            Icon::Layout => "icon-layout",
            Icon::Server => "icon-server",
            Icon::Shield => "icon-shield",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Trophy | Icon::Award => "\u{1F3C6}",
            Icon::Headset => "\u{1F3A7}",
            Icon::ShieldCheck | Icon::Shield => "\u{1F6E1}",
            Icon::Zap => "\u{26A1}",
            Icon::Sun => "\u{2600}",
            Icon::Wind => "\u{1F32C}",
            Icon::Droplet => "\u{1F4A7}",
            Icon::Layers => "\u{1F5C2}",
            Icon::Users => "\u{1F465}",
            Icon::TrendingUp => "\u{1F4C8}",
            Icon::Settings => "\u{2699}",
            Icon::Truck => "\u{1F69A}",
            Icon::PenTool => "\u{1F58B}",
            Icon::Layout => "\u{1F5BC}",
            Icon::Server => "\u{1F5A5}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_aliases_resolve() {
        assert_eq!(Icon::from_name("MdSupportAgent"), Icon::Headset);
        assert_eq!(Icon::from_name("BsShieldCheck"), Icon::ShieldCheck);
    }

    #[test]
    fn unknown_falls_back_to_trophy() {
        assert_eq!(Icon::from_name("Rocket"), Icon::Trophy);
        assert_eq!(Icon::lookup("Rocket"), None);
    }
}
