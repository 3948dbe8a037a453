/// Restricts extraction to some regions and countries.
///
/// An empty list means no restriction. Countries match with or without the
/// `.md` suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerFilter {
    regions: Vec<String>,
    countries: Vec<String>,
}

impl PeerFilter {
    pub fn new(regions: Vec<String>, countries: Vec<String>) -> Self {
        Self {
            regions,
            countries: countries.into_iter().map(|c| strip_md(&c).to_string()).collect(),
        }
    }

    pub fn matches_region(&self, region: &str) -> bool {
        self.regions.is_empty() || self.regions.iter().any(|r| r == region)
    }

    pub fn matches_country(&self, country: &str) -> bool {
        self.countries.is_empty() || self.countries.iter().any(|c| c == strip_md(country))
    }
}

fn strip_md(name: &str) -> &str {
    name.strip_suffix(".md").unwrap_or(name)
}
