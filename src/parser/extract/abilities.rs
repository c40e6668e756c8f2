use crate::parser::text::{is_image_line, strip_formatting};
use crate::record::AbilityScores;

use super::stats::leading_int;

/// Cells that name a column rather than hold a score.
const LABEL_CELLS: &[&str] = &["str", "dex", "con", "int", "wis", "cha", "mod", "save", "score"];

pub fn extract(lines: &[String]) -> AbilityScores {
    let lines: Vec<&str> = lines
        .iter()
        .map(String::as_str)
        .filter(|l| !is_image_line(l))
        .collect();
    AbilityScores {
        strength: score_for(&lines, "STR"),
        dexterity: score_for(&lines, "DEX"),
        constitution: score_for(&lines, "CON"),
        intelligence: score_for(&lines, "INT"),
        wisdom: score_for(&lines, "WIS"),
        charisma: score_for(&lines, "CHA"),
    }
}

/// Table cell first (`| STR | 17 (+3) |`, or a header row with values below),
/// then inline `STR 17 (+3)`, then `STR` alone with the score on the next line.
fn score_for(lines: &[&str], code: &str) -> Option<u32> {
    table_score(lines, code)
        .or_else(|| inline_score(lines, code))
        .or_else(|| stacked_score(lines, code))
}

fn table_score(lines: &[&str], code: &str) -> Option<u32> {
    for (i, line) in lines.iter().enumerate() {
        if !line.contains('|') {
            continue;
        }
        let cells = table_cells(line);
        let Some(col) = cells.iter().position(|c| c.eq_ignore_ascii_case(code)) else {
            continue;
        };

        // Row layout: the score follows the code on the same line.
        if let Some(cell) = cells[col + 1..]
            .iter()
            .find(|c| !c.is_empty() && !is_label_cell(c))
        {
            return leading_int(cell);
        }

        // Header layout: the score sits in the same column of the next data row.
        let value_row = lines[i + 1..]
            .iter()
            .take_while(|l| l.contains('|'))
            .map(|l| table_cells(l))
            .find(|cells| !is_separator_row(cells))?;
        return value_row.get(col).and_then(|cell| leading_int(cell));
    }
    None
}

fn inline_score(lines: &[&str], code: &str) -> Option<u32> {
    lines.iter().find_map(|line| {
        let text = strip_formatting(line);
        let head = text.get(..code.len())?;
        let rest = &text[code.len()..];
        if head.eq_ignore_ascii_case(code) && rest.starts_with(' ') {
            leading_int(rest)
        } else {
            None
        }
    })
}

fn stacked_score(lines: &[&str], code: &str) -> Option<u32> {
    let pos = lines
        .iter()
        .position(|l| strip_formatting(l).eq_ignore_ascii_case(code))?;
    let next = lines[pos + 1..]
        .iter()
        .map(|l| strip_formatting(l))
        .find(|l| !l.is_empty())?;
    leading_int(&next)
}

fn table_cells(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(strip_formatting)
        .collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    cells
        .iter()
        .all(|c| c.chars().all(|ch| matches!(ch, '-' | ':' | ' ')))
}

fn is_label_cell(cell: &str) -> bool {
    let lower = cell.to_lowercase();
    LABEL_CELLS.contains(&lower.as_str())
}
