use crate::models::{Dietzies, HistoryEntry, HistoryItemView, Passes};
use chrono::{DateTime, Utc};

/// Credits one dietzie for a completed pass and returns the new available
/// count. Callers invoke this exactly once per completion event; the ledger
/// itself does not dedup.
pub fn award(dietzies: &mut Dietzies, source: &str, now: DateTime<Utc>) -> u32 {
    dietzies.available += 1;
    dietzies.total_earned += 1;
    dietzies.history.push(HistoryEntry::Earned {
        source: source.to_string(),
        timestamp: now,
    });
    dietzies.available
}

/// Spends one dietzie. False (and no mutation) when none are available.
pub fn redeem(dietzies: &mut Dietzies, now: DateTime<Utc>) -> bool {
    if dietzies.available == 0 {
        return false;
    }

    dietzies.available -= 1;
    dietzies.total_redeemed += 1;
    dietzies.history.push(HistoryEntry::Redeemed { timestamp: now });
    true
}

/// Display form of a ledger entry: earned entries name their source pass
/// (falling back to the raw id when the pass is gone from the catalog), dates
/// are short DD.MM.YY.
pub fn format_history_item(entry: &HistoryEntry, passes: &Passes) -> HistoryItemView {
    match entry {
        HistoryEntry::Earned { source, timestamp } => {
            let name = passes
                .get(source)
                .map(|pass| pass.name.as_str())
                .unwrap_or(source.as_str());
            HistoryItemView {
                text: format!("Verdient: {name}"),
                date: short_date(timestamp),
                kind: "earned".to_string(),
            }
        }
        HistoryEntry::Redeemed { timestamp } => HistoryItemView {
            text: "Eingelöst".to_string(),
            date: short_date(timestamp),
            kind: "redeemed".to_string(),
        },
    }
}

fn short_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d.%m.%y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pass, PassKind, SimpleState};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 3, 18, 0, 0).unwrap()
    }

    fn ledger_invariant(dietzies: &Dietzies) -> bool {
        dietzies.available == dietzies.total_earned - dietzies.total_redeemed
    }

    #[test]
    fn award_and_redeem_keep_the_ledger_balanced() {
        let mut dietzies = Dietzies::default();

        assert_eq!(award(&mut dietzies, "sauna", now()), 1);
        assert_eq!(award(&mut dietzies, "fitness", now()), 2);
        assert!(ledger_invariant(&dietzies));

        assert!(redeem(&mut dietzies, now()));
        assert!(ledger_invariant(&dietzies));
        assert_eq!(dietzies.available, 1);
        assert_eq!(dietzies.total_earned, 2);
        assert_eq!(dietzies.total_redeemed, 1);
        assert_eq!(dietzies.history.len(), 3);
    }

    #[test]
    fn redeem_on_empty_ledger_mutates_nothing() {
        let mut dietzies = Dietzies::default();
        assert!(!redeem(&mut dietzies, now()));
        assert_eq!(dietzies.available, 0);
        assert_eq!(dietzies.total_redeemed, 0);
        assert!(dietzies.history.is_empty());
    }

    #[test]
    fn history_preserves_entry_order() {
        let mut dietzies = Dietzies::default();
        award(&mut dietzies, "sauna", now());
        redeem(&mut dietzies, now());
        award(&mut dietzies, "sauna", now());

        let kinds: Vec<_> = dietzies
            .history
            .iter()
            .map(|entry| matches!(entry, HistoryEntry::Earned { .. }))
            .collect();
        assert_eq!(kinds, vec![true, false, true]);
    }

    #[test]
    fn formatting_resolves_pass_names_with_raw_id_fallback() {
        let mut passes: BTreeMap<String, Pass> = BTreeMap::new();
        passes.insert(
            "sauna".to_string(),
            Pass {
                id: "sauna".to_string(),
                name: "Sauna".to_string(),
                icon: "♨️".to_string(),
                target: 10,
                kind: PassKind::Simple(SimpleState::default()),
                completed_rounds: 0,
            },
        );

        let earned = HistoryEntry::Earned {
            source: "sauna".to_string(),
            timestamp: now(),
        };
        let item = format_history_item(&earned, &passes);
        assert_eq!(item.text, "Verdient: Sauna");
        assert_eq!(item.date, "03.02.26");
        assert_eq!(item.kind, "earned");

        let orphan = HistoryEntry::Earned {
            source: "retired".to_string(),
            timestamp: now(),
        };
        assert_eq!(
            format_history_item(&orphan, &passes).text,
            "Verdient: retired"
        );

        let redeemed = HistoryEntry::Redeemed { timestamp: now() };
        let item = format_history_item(&redeemed, &passes);
        assert_eq!(item.text, "Eingelöst");
        assert_eq!(item.kind, "redeemed");
    }
}
