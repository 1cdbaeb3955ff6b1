use crate::models::{ActivityEntry, ActivityKind, ActivityMonth, ActivityRepo, Event};

struct MonthAccum {
    label: String,
    // repo -> accumulated commit weight
    pushes: Vec<(String, u32)>,
    created: Vec<String>,
}

/// Month-bucketed activity rollups from the event feed. Months appear in
/// the order the feed first mentions them (any event opens a month, even
/// kinds that produce no entry); months that end up with nothing to show
/// are dropped.
pub fn activity_timeline(events: &[Event], username: &str) -> Vec<ActivityMonth> {
    let mut months: Vec<MonthAccum> = Vec::new();

    for event in events {
        let label = event.created_at.format("%b %Y").to_string();
        let index = match months.iter().position(|m| m.label == label) {
            Some(index) => index,
            None => {
                months.push(MonthAccum {
                    label,
                    pushes: Vec::new(),
                    created: Vec::new(),
                });
                months.len() - 1
            }
        };

        let repo_name = event.local_repo_name(username);
        let month = &mut months[index];

        if event.is_push() {
            let weight = event.commit_weight();
            match month.pushes.iter_mut().find(|(name, _)| name == repo_name) {
                Some((_, count)) => *count += weight,
                None => month.pushes.push((repo_name.to_string(), weight)),
            }
        } else if event.is_repo_creation() {
            month.created.push(repo_name.to_string());
        }
    }

    months.into_iter().filter_map(month_entries).collect()
}

fn month_entries(month: MonthAccum) -> Option<ActivityMonth> {
    let mut entries = Vec::new();

    if !month.pushes.is_empty() {
        let total: u32 = month.pushes.iter().map(|(_, count)| *count).sum();
        let mut rollup = month.pushes;
        rollup.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        entries.push(ActivityEntry {
            kind: ActivityKind::Commits,
            description: format!(
                "Created {} commits in {} {}",
                total,
                rollup.len(),
                plural_repos(rollup.len())
            ),
            repos: rollup
                .into_iter()
                .map(|(name, commits)| ActivityRepo {
                    name,
                    commits: Some(commits),
                    lang: None,
                })
                .collect(),
        });
    }

    if !month.created.is_empty() {
        entries.push(ActivityEntry {
            kind: ActivityKind::Repos,
            description: format!(
                "Created {} {}",
                month.created.len(),
                plural_repos(month.created.len())
            ),
            repos: month
                .created
                .into_iter()
                .map(|name| ActivityRepo {
                    name,
                    commits: None,
                    lang: None,
                })
                .collect(),
        });
    }

    if entries.is_empty() {
        None
    } else {
        Some(ActivityMonth {
            month: month.label,
            events: entries,
        })
    }
}

fn plural_repos(n: usize) -> &'static str {
    if n == 1 {
        "repository"
    } else {
        "repositories"
    }
}
