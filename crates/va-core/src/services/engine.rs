use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{
    AllocationOutcome, AllocationRequest, AssignmentKey, ExpansionWarning, IdentityKey,
    Registrant, RosterRow, SlotAssignment, TimeWindow, WindowSummary,
};

use super::window_parser;

/// Run one allocation round.
///
/// Stages run in a fixed order: expand selections, drop blacklisted people,
/// drop exited assignments, drop assignments already held in history, fill
/// each window in sign-up order, then prepend history unless only the
/// increment was asked for.
pub fn allocate(request: &AllocationRequest) -> AllocationOutcome {
    let (candidates, warnings) = expand(&request.registrations);
    let expanded = candidates.len();

    let candidates = filter_blacklist(candidates, &request.blacklist);
    let after_blacklist = candidates.len();

    let candidates = filter_exits(candidates, &request.exits);
    let after_exits = candidates.len();

    let candidates = filter_duplicates(candidates, &request.history);
    tracing::debug!(
        expanded,
        after_blacklist,
        after_exits,
        after_duplicates = candidates.len(),
        "candidates_filtered"
    );

    let capacity = request.capacity.get() as usize;
    let (admitted, windows) = allocate_by_window(candidates, &request.history, capacity);
    let newly_admitted = admitted.len();

    let include_history = !request.incremental_only && !request.history.is_empty();
    let roster = compose(&request.history, admitted, include_history);
    let carried_forward = if include_history {
        request.history.len()
    } else {
        0
    };

    let outcome = AllocationOutcome {
        roster,
        newly_admitted,
        carried_forward,
        windows,
        warnings,
    };
    tracing::info!(
        rows = outcome.roster.len(),
        newly_admitted,
        carried_forward,
        rejected = outcome.rejected(),
        "allocation_complete"
    );
    outcome
}

/// Split every registrant into one candidate per window in their selections.
pub fn expand(registrants: &[Registrant]) -> (Vec<SlotAssignment>, Vec<ExpansionWarning>) {
    let mut candidates = Vec::new();
    let mut warnings = Vec::new();

    for registrant in registrants {
        let scan = window_parser::scan(&registrant.selections);
        if scan.is_empty() {
            warnings.push(ExpansionWarning::NoWindows {
                sequence: registrant.sequence,
                name: registrant.identity.name.clone(),
            });
        }
        for text in scan.malformed {
            tracing::warn!(sequence = registrant.sequence, %text, "malformed window ignored");
            warnings.push(ExpansionWarning::MalformedWindow {
                sequence: registrant.sequence,
                name: registrant.identity.name.clone(),
                text,
            });
        }
        candidates.extend(scan.windows.into_iter().map(|window| SlotAssignment {
            identity: registrant.identity.clone(),
            sex: registrant.sex.clone(),
            window,
            sequence: registrant.sequence,
        }));
    }

    (candidates, warnings)
}

pub fn filter_blacklist(
    candidates: Vec<SlotAssignment>,
    blacklist: &HashSet<IdentityKey>,
) -> Vec<SlotAssignment> {
    candidates
        .into_iter()
        .filter(|c| !blacklist.contains(&c.identity))
        .collect()
}

pub fn filter_exits(
    candidates: Vec<SlotAssignment>,
    exits: &HashSet<AssignmentKey>,
) -> Vec<SlotAssignment> {
    candidates
        .into_iter()
        .filter(|c| !exits.contains(&c.key()))
        .collect()
}

/// Drop assignments already held in history, and repeats of an assignment
/// within this run (the earliest sign-up stays).
pub fn filter_duplicates(
    mut candidates: Vec<SlotAssignment>,
    history: &[RosterRow],
) -> Vec<SlotAssignment> {
    candidates.sort_by_key(|c| c.sequence);
    let mut held: HashSet<AssignmentKey> = history.iter().map(RosterRow::key).collect();
    candidates
        .into_iter()
        .filter(|c| held.insert(c.key()))
        .collect()
}

/// Fill each window up to `capacity` minus the seats history already uses,
/// earliest sign-up first. Windows are visited in ascending order.
pub fn allocate_by_window(
    candidates: Vec<SlotAssignment>,
    history: &[RosterRow],
    capacity: usize,
) -> (Vec<RosterRow>, Vec<WindowSummary>) {
    let mut history_counts: HashMap<TimeWindow, usize> = HashMap::new();
    for row in history {
        *history_counts.entry(row.window).or_default() += 1;
    }

    let mut groups: BTreeMap<TimeWindow, Vec<SlotAssignment>> = BTreeMap::new();
    for candidate in candidates {
        groups.entry(candidate.window).or_default().push(candidate);
    }

    let mut admitted = Vec::new();
    let mut summaries = Vec::with_capacity(groups.len());
    for (window, mut group) in groups {
        let history_count = history_counts.get(&window).copied().unwrap_or(0);
        let remaining = capacity.saturating_sub(history_count);
        let candidates = group.len();

        group.sort_by_key(|c| c.sequence);
        group.truncate(remaining);
        let taken = group.len();
        admitted.extend(group.into_iter().map(RosterRow::from));

        tracing::debug!(%window, history_count, remaining, candidates, taken, "window_allocated");
        summaries.push(WindowSummary {
            window,
            history_count,
            remaining,
            candidates,
            admitted: taken,
            rejected: candidates - taken,
        });
    }

    (admitted, summaries)
}

/// History rows first when requested, then this round's admissions.
pub fn compose(
    history: &[RosterRow],
    admitted: Vec<RosterRow>,
    include_history: bool,
) -> Vec<RosterRow> {
    if !include_history {
        return admitted;
    }
    let mut roster = Vec::with_capacity(history.len() + admitted.len());
    roster.extend_from_slice(history);
    roster.extend(admitted);
    roster
}

/// Distinct people in sign-up order, for the blacklist picker.
pub fn blacklist_options(registrants: &[Registrant]) -> Vec<IdentityKey> {
    let mut seen = HashSet::new();
    registrants
        .iter()
        .filter(|r| seen.insert(r.identity.clone()))
        .map(|r| r.identity.clone())
        .collect()
}

/// Distinct (person, window) pairs in sign-up order, for the exit picker.
pub fn exit_options(registrants: &[Registrant]) -> Vec<AssignmentKey> {
    let (candidates, _) = expand(registrants);
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|c| c.key())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}
