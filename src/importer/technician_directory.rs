// ==========================================
// Fuel Ledger - Technician directory
// ==========================================
// Responsibility: normalized site id -> assigned technician
// Read-only after construction; injected into the Block Extractor
// ==========================================

use crate::config::TechnicianAssignment;
use crate::domain::entry::NOT_ASSIGNED;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct TechnicianDirectory {
    by_site: HashMap<String, String>,
}

impl TechnicianDirectory {
    /// Invert a technician -> sites roster.
    /// A site listed under several technicians keeps the first listing.
    pub fn from_roster(roster: &[TechnicianAssignment]) -> Self {
        let mut by_site = HashMap::new();
        for assignment in roster {
            for site in &assignment.sites {
                let site = site.trim().to_uppercase();
                if let Some(existing) = by_site.get(&site) {
                    warn!(
                        site_id = %site,
                        kept = %existing,
                        ignored = %assignment.technician,
                        "site assigned to more than one technician"
                    );
                    continue;
                }
                by_site.insert(site, assignment.technician.clone());
            }
        }
        Self { by_site }
    }

    /// Build from explicit (site id, technician) pairs
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            by_site: pairs
                .into_iter()
                .map(|(site, tech)| (site.into(), tech.into()))
                .collect(),
        }
    }

    pub fn lookup(&self, site_id: &str) -> Option<&str> {
        self.by_site.get(site_id).map(String::as_str)
    }

    /// Technician for a site, `N/A` when unassigned
    pub fn technician_for(&self, site_id: &str) -> String {
        self.lookup(site_id).unwrap_or(NOT_ASSIGNED).to_string()
    }

    pub fn len(&self) -> usize {
        self.by_site.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_site.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_roster;

    #[test]
    fn test_default_roster_lookup() {
        let directory = TechnicianDirectory::from_roster(&default_roster());
        assert_eq!(directory.technician_for("IHS_CBT_045M"), "JUSTIN");
        assert_eq!(directory.technician_for("IHS_CBT_018M"), "KENNEDY");
        assert_eq!(directory.technician_for("IHS_CBT_999Z"), "N/A");
        assert_eq!(directory.len(), 253);
    }

    #[test]
    fn test_first_listing_wins() {
        let roster = vec![
            TechnicianAssignment {
                technician: "ALICE".to_string(),
                sites: vec!["IHS_CBT_001M".to_string()],
            },
            TechnicianAssignment {
                technician: "BOB".to_string(),
                sites: vec!["ihs_cbt_001m ".to_string(), "IHS_CBT_002M".to_string()],
            },
        ];
        let directory = TechnicianDirectory::from_roster(&roster);
        assert_eq!(directory.lookup("IHS_CBT_001M"), Some("ALICE"));
        assert_eq!(directory.lookup("IHS_CBT_002M"), Some("BOB"));
    }

    #[test]
    fn test_fixture_directory() {
        let directory = TechnicianDirectory::from_pairs([("IHS_CBT_100A", "TEST TECH")]);
        assert_eq!(directory.technician_for("IHS_CBT_100A"), "TEST TECH");
        assert!(!directory.is_empty());
    }
}
