use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::selection::Selection;
use super::types::{Catalog, ChangelogEntry, Tool};

/// Changelog entries published on one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date: NaiveDate,
    /// Entries in their incoming order.
    pub entries: Vec<&'a ChangelogEntry>,
}

/// A tool together with the number of changelog entries it owns.
#[derive(Debug, Clone, Copy)]
pub struct ToolChangelogCount<'a> {
    pub tool: &'a Tool,
    pub count: usize,
}

/// Keep the entries owned by the selected tool. `Selection::All` keeps everything.
pub fn filter_changelog<'a>(
    entries: &'a [ChangelogEntry],
    selection: &Selection,
) -> Vec<&'a ChangelogEntry> {
    entries
        .iter()
        .filter(|e| selection.matches(&e.tool_id))
        .collect()
}

/// Bucket entries by date, newest date first.
///
/// Entries inside a bucket keep the order they arrived in.
pub fn group_by_date<'a, I>(entries: I) -> Vec<DateGroup<'a>>
where
    I: IntoIterator<Item = &'a ChangelogEntry>,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a ChangelogEntry>> = BTreeMap::new();
    for entry in entries {
        buckets.entry(entry.date).or_default().push(entry);
    }
    buckets
        .into_iter()
        .rev()
        .map(|(date, entries)| DateGroup { date, entries })
        .collect()
}

/// Filter by owning tool, then group by date.
pub fn changelog_view<'a>(
    entries: &'a [ChangelogEntry],
    selection: &Selection,
) -> Vec<DateGroup<'a>> {
    let filtered = filter_changelog(entries, selection);
    let matched = filtered.len();
    let groups = group_by_date(filtered);
    tracing::debug!(
        selection = %selection,
        matched,
        groups = groups.len(),
        "Recomputed changelog view"
    );
    groups
}

/// Tools that own at least one entry, in catalog order, with their counts.
pub fn tools_with_changelogs<'a>(
    tools: &'a [Tool],
    entries: &[ChangelogEntry],
) -> Vec<ToolChangelogCount<'a>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.tool_id.as_str()).or_default() += 1;
    }
    tools
        .iter()
        .filter_map(|tool| {
            counts
                .get(tool.id.as_str())
                .map(|&count| ToolChangelogCount { tool, count })
        })
        .collect()
}

impl Catalog {
    pub fn changelog_view(&self, selection: &Selection) -> Vec<DateGroup<'_>> {
        changelog_view(&self.changelog, selection)
    }

    pub fn tools_with_changelogs(&self) -> Vec<ToolChangelogCount<'_>> {
        tools_with_changelogs(&self.tools, &self.changelog)
    }
}
