use crate::model::decay::DecayedEntry;

/// Renders a fixed-width `Place  Name  TrueSkill` table, one player per line.
/// Exposures are rounded to two decimals.
pub fn leaderboard_table(rows: &[(u32, &str, f64)]) -> String {
    let name_width = rows.iter().map(|(_, name, _)| name.chars().count()).max().unwrap_or(0);

    let mut table = format!("Place  Name{}TrueSkill\n", " ".repeat(name_width.saturating_sub(2)));
    table.push_str(&"-".repeat(6 + name_width + 12));
    table.push('\n');

    for (place, name, exposure) in rows {
        let place = place.to_string();
        table.push_str(&format!(
            "#{}{} {}{}{:.2}\n",
            place,
            " ".repeat(5usize.saturating_sub(place.len())),
            name,
            " ".repeat(name_width - name.chars().count() + 2),
            exposure
        ));
    }

    table
}

/// Table of a decayed leaderboard, ranked and scored by adjusted exposure
pub fn decayed_table(entries: &[DecayedEntry]) -> String {
    let rows = entries
        .iter()
        .map(|e| (e.decayed_placement, e.entry.player.as_str(), e.adjusted_exposure))
        .collect::<Vec<_>>();

    leaderboard_table(&rows)
}
