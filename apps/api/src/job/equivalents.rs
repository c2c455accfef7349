//! Technology equivalence mapping: related technologies for each entry of a
//! tech stack, from the static cluster table.

use std::collections::{BTreeMap, HashSet};

use crate::dictionaries::TechCluster;
use crate::text::contains_term;

/// Maps each technology to the other members of every cluster it belongs to.
///
/// A technology belongs to a cluster when its name contains one of the
/// cluster's terms as a whole word (`.NET Core` belongs to the C# cluster,
/// `Java` does not belong to the JavaScript one). Unmatched technologies map to
/// an empty list. Related names containing the technology itself are dropped
/// (`Git` does not list `GitHub`).
pub fn map_equivalents(tech_stack: &[String], clusters: &[TechCluster]) -> BTreeMap<String, Vec<String>> {
    let mut mappings = BTreeMap::new();

    for tech in tech_stack {
        let tech = tech.trim();
        if tech.is_empty() {
            continue;
        }
        let tech_lower = tech.to_lowercase();

        let mut seen = HashSet::new();
        let related: Vec<String> = clusters
            .iter()
            .filter(|c| c.all().any(|t| contains_term(&tech_lower, &t.to_lowercase())))
            .flat_map(TechCluster::all)
            .filter(|t| !t.to_lowercase().contains(&tech_lower))
            .filter(|t| seen.insert(t.to_lowercase()))
            .map(str::to_string)
            .collect();

        mappings.insert(tech.to_string(), related);
    }
    mappings
}
