//! Skill coverage: every skill a task needs must be offered by some worker.

use std::collections::HashSet;

use roster_model::columns::{REQUIRED_SKILLS, SKILLS};
use roster_model::{Finding, Row, list_tokens, text_of};

pub fn check(tasks: &[Row], workers: &[Row]) -> Vec<Finding> {
    let available = worker_skills(workers);
    let mut issues = Vec::new();

    for (idx, task) in tasks.iter().enumerate() {
        let required = text_of(task, REQUIRED_SKILLS);
        for skill in list_tokens(&required) {
            if !available.contains(skill) {
                issues.push(Finding::error(
                    idx + 1,
                    REQUIRED_SKILLS,
                    format!("Required skill not offered by any worker: {skill}"),
                ));
            }
        }
    }

    issues
}

/// Union of all workers' Skills tokens.
pub fn worker_skills(workers: &[Row]) -> HashSet<String> {
    let mut skills = HashSet::new();
    for worker in workers {
        let text = text_of(worker, SKILLS);
        skills.extend(list_tokens(&text).map(ToString::to_string));
    }
    skills
}
