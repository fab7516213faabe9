use crate::timestamp::SnapshotTimestamp;
use crate::types::ChangeRecord;

/// Bold markup of the chat network.
pub fn bold(text: &str) -> String {
    format!("*{}*", text)
}

pub fn italic(text: &str) -> String {
    format!("_{}_", text)
}

/// `<summ_id>: <tier> (<lp> LP) <change>`, promotions and demotions in bold.
pub fn change_line(record: &ChangeRecord) -> String {
    let change = if record.kind().is_emphasised() {
        bold(&record.change)
    } else {
        record.change.clone()
    };
    format!(
        "{}: {} ({} LP) {}",
        record.summ_id, record.tier, record.lp, change
    )
}

pub fn last_updated_line(timestamp: &SnapshotTimestamp) -> String {
    italic(&format!("Last updated: {}", timestamp))
}

/// Whole percentages without decimals, everything else rounded to 2 places.
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    let rounded = format!("{:.2}", value);
    rounded.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeKind;

    fn record(change: &str, kind: Option<ChangeKind>) -> ChangeRecord {
        ChangeRecord {
            summ_id: "p1".to_string(),
            tier: "GOLD".to_string(),
            lp: 50,
            change: change.to_string(),
            queue: String::new(),
            kind,
        }
    }

    #[test]
    fn change_line_emphasis() {
        assert_eq!(
            change_line(&record("PROMOTED to GOLD", None)),
            "p1: GOLD (50 LP) *PROMOTED to GOLD*"
        );
        assert_eq!(
            change_line(&record("-20 LP - DEMOTED from GOLD to SILVER", None)),
            "p1: GOLD (50 LP) *-20 LP - DEMOTED from GOLD to SILVER*"
        );
        assert_eq!(change_line(&record("+14 LP", None)), "p1: GOLD (50 LP) +14 LP");
        assert_eq!(
            change_line(&record("+14 LP", Some(ChangeKind::Promoted))),
            "p1: GOLD (50 LP) *+14 LP*"
        );
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(60.0), "60");
        assert_eq!(format_percent(57.142857), "57.14");
        assert_eq!(format_percent(57.1), "57.1");
        assert_eq!(format_percent(0.0), "0");
    }
}
