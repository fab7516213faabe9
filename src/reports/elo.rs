use super::reports_utils::*;
use crate::types::{ChangeRecord, EloSnapshot, QueueName};
use itertools::Itertools;

pub const NO_ELO_CHANGES: &str = "No ELO changes available!";

/// Records grouped by queue. Queues keep the order they were first seen in,
/// records keep their order within a queue.
#[derive(Debug, Default, PartialEq)]
pub struct QueueGroups<'a> {
    groups: Vec<(&'a QueueName, Vec<&'a ChangeRecord>)>,
}

impl<'a> QueueGroups<'a> {
    pub fn group(records: &'a [ChangeRecord]) -> Self {
        let mut queue_groups = QueueGroups::default();
        for record in records {
            queue_groups.push(record);
        }
        queue_groups
    }

    fn push(&mut self, record: &'a ChangeRecord) {
        match self
            .groups
            .iter_mut()
            .find(|(queue, _)| **queue == record.queue)
        {
            Some((_, records)) => records.push(record),
            None => self.groups.push((&record.queue, vec![record])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a QueueName, &[&'a ChangeRecord])> + '_ {
        self.groups
            .iter()
            .map(|(queue, records)| (*queue, records.as_slice()))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.groups.len()
    }
}

/// Pre-ranked top changes, rendered in the order the tracker wrote them.
pub fn format_top_changes(snapshot: &EloSnapshot) -> String {
    let top_changes = match snapshot.top_changes.as_deref() {
        Some(changes) if !changes.is_empty() => changes,
        _ => return NO_ELO_CHANGES.to_string(),
    };
    let lines = top_changes
        .iter()
        .enumerate()
        .map(|(i, record)| format!("#{} {}", i + 1, change_line(record)))
        .join("\n");
    format!("{}\n\n{}", bold("TOP 5 ELO CHANGES"), lines)
}

pub fn format_full_changes(snapshot: &EloSnapshot) -> String {
    let changes = match snapshot.changes.as_deref() {
        Some(changes) if !changes.is_empty() => changes,
        _ => return NO_ELO_CHANGES.to_string(),
    };
    let sections = QueueGroups::group(changes)
        .iter()
        .map(|(queue, records)| {
            let lines = records
                .iter()
                .enumerate()
                .map(|(i, record)| format!("  {}. {}", i + 1, change_line(record)))
                .join("\n");
            format!("{}:\n{}", bold(queue), lines)
        })
        .join("\n\n");
    let mut message = format!("{}\n\n{}", bold("FULL ELO CHANGES"), sections);
    if let Some(timestamp) = &snapshot.timestamp {
        message.push_str("\n\n");
        message.push_str(&last_updated_line(timestamp));
    }
    message
}
