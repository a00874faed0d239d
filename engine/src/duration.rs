//! Spell duration index lookup.
//!
//! The snapshot only stores an index into a duration table that is not part
//! of the data set, so the common indices are listed here by hand. Anything
//! else goes through [`heuristic`], which is an approximation and renders
//! large unknown indices as a bracketed marker instead of guessing.

const KNOWN: &[(i32, &str)] = &[
    (1, "10 sec"),
    (3, "1 min"),
    (4, "2 min"),
    (5, "5 min"),
    (6, "10 min"),
    (7, "5 sec"),
    (8, "15 sec"),
    (9, "30 sec"),
    (10, "1 min"),
    (18, "20 sec"),
    (21, "until cancelled"),
    (22, "45 sec"),
    (23, "90 sec"),
    (25, "3 min"),
    (26, "4 min"),
    (27, "3 sec"),
    (28, "5 sec"),
    (29, "12 sec"),
    (30, "30 min"),
    (31, "8 sec"),
    (32, "6 sec"),
    (35, "4 sec"),
    (36, "1 sec"),
    (39, "2 sec"),
    (42, "1 hour"),
    // food and drink
    (85, "18 sec"),
    (86, "21 sec"),
    (105, "24 sec"),
    (106, "27 sec"),
    (205, "30 sec"),
    // well fed
    (347, "15 min"),
    (367, "2 hours"),
];

/// Duration text for a spell's `durationIndex`, or `None` when the index is
/// absent (zero or negative).
pub fn duration_for(index: i32) -> Option<String> {
    if index <= 0 {
        return None;
    }
    Some(match known(index) {
        Some(text) => text.to_string(),
        None => heuristic(index),
    })
}

/// Exact entry from the hand-maintained table.
pub fn known(index: i32) -> Option<&'static str> {
    KNOWN
        .iter()
        .find(|(idx, _)| *idx == index)
        .map(|(_, text)| *text)
}

/// Fallback for positive indices missing from the table.
pub fn heuristic(index: i32) -> String {
    if index < 10 {
        format!("{} sec", index * 3)
    } else if index < 30 {
        format!("{} sec", index)
    } else {
        format!("[{} duration]", index)
    }
}
