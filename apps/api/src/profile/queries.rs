//! Read-only views derived from the profile document.
//!
//! All matching is case-insensitive. Every view is a linear scan; the
//! embedded arrays hold at most a few dozen elements.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::profile::{Profile, Project, WorkEntry};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillCount {
    pub skill: String,
    pub occurrences: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchResults {
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
    pub work: Vec<WorkEntry>,
}

/// Projects whose skill list contains `skill` (case-insensitive exact match).
/// An absent or empty filter returns every project.
pub fn filter_projects(projects: &[Project], skill: Option<&str>) -> Vec<Project> {
    let Some(skill) = skill.filter(|s| !s.is_empty()) else {
        return projects.to_vec();
    };
    let wanted = skill.to_lowercase();
    projects
        .iter()
        .filter(|p| p.skills.iter().any(|s| s.to_lowercase() == wanted))
        .cloned()
        .collect()
}

/// Counts every skill mention across the top-level list, projects and work,
/// folded to lower case, highest count first.
///
/// Ties keep first-seen order: top-level skills, then projects in order,
/// then work entries in order.
pub fn rank_skills(profile: &Profile) -> Vec<SkillCount> {
    let mentions = profile
        .skills
        .iter()
        .chain(profile.projects.iter().flat_map(|p| p.skills.iter()))
        .chain(profile.work.iter().flat_map(|w| w.skills.iter()));

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<SkillCount> = Vec::new();
    for skill in mentions {
        let key = skill.to_lowercase();
        match index.get(&key) {
            Some(&i) => counts[i].occurrences += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push(SkillCount {
                    skill: key,
                    occurrences: 1,
                });
            }
        }
    }

    // sort_by is stable, which gives the first-seen tie order.
    counts.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    counts
}

/// Free-text search. The query is trimmed and lower-cased; an empty query
/// matches nothing.
pub fn search(profile: &Profile, query: &str) -> SearchResults {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return SearchResults::default();
    }

    let contains = |text: &str| text.to_lowercase().contains(&q);
    let contains_opt = |text: &Option<String>| text.as_deref().is_some_and(contains);
    let any_skill = |skills: &[String]| skills.iter().any(|s| contains(s));

    let projects = profile
        .projects
        .iter()
        .filter(|p| contains(&p.title) || contains_opt(&p.description) || any_skill(&p.skills))
        .cloned()
        .collect();

    let skills = profile
        .skills
        .iter()
        .filter(|s| contains(s))
        .cloned()
        .collect();

    let work = profile
        .work
        .iter()
        .filter(|w| {
            contains_opt(&w.company)
                || contains_opt(&w.role)
                || contains_opt(&w.description)
                || any_skill(&w.skills)
        })
        .cloned()
        .collect();

    SearchResults {
        projects,
        skills,
        work,
    }
}
