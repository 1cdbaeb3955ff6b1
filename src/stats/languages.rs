use std::collections::HashMap;

use crate::models::{LanguageStat, Repository};

const MAX_LANGUAGES: usize = 6;

/// Language mix across source repositories: one vote per non-fork repo
/// that reports a primary language, top six by vote count, each expressed
/// as a rounded percentage of the voting repos. The percentages describe
/// the full population, so they need not sum to 100.
pub fn language_shares(repos: &[Repository]) -> Vec<LanguageStat> {
    let mut votes: HashMap<&str, u32> = HashMap::new();
    let mut total = 0u32;

    for repo in repos {
        if repo.fork {
            continue;
        }
        if let Some(language) = repo.language.as_deref() {
            *votes.entry(language).or_insert(0) += 1;
            total += 1;
        }
    }

    if total == 0 {
        return Vec::new();
    }

    let mut counted: Vec<(&str, u32)> = votes.into_iter().collect();
    counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    counted
        .into_iter()
        .take(MAX_LANGUAGES)
        .map(|(name, count)| LanguageStat {
            name: name.to_string(),
            percentage: (f64::from(count) / f64::from(total) * 100.0).round() as u32,
        })
        .collect()
}
