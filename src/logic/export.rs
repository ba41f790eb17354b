//! CSV export of a playoff's resolved matchups.

use crate::models::Playoff;

const HEADER: [&str; 7] = [
    "match",
    "stage",
    "winner_id",
    "winner_title",
    "loser_id",
    "loser_title",
    "decided_at",
];

/// One header row plus one row per resolved matchup, oldest first.
pub fn history_csv(playoff: &Playoff) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for r in &playoff.history {
        wtr.write_record([
            r.number.to_string().as_str(),
            r.stage.label(),
            r.winner_id.as_str(),
            r.winner_title.as_str(),
            r.loser_id.as_str(),
            r.loser_title.as_str(),
            r.decided_at.to_rfc3339().as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
