use crate::contracts::{Dataset, Record};

pub const DELIMITER: char = '|';

/// Columns assumed when the table arrives without a header line.
pub const STANDARD_COLUMNS: [&str; 10] = [
    "S.No",
    "Question",
    "Option A",
    "Option B",
    "Option C",
    "Option D",
    "Answer",
    "Explanation",
    "Difficulty",
    "Topic",
];

/// Header cells marking a header line. Compared against whole cells,
/// case-insensitively and ignoring spaces and a trailing `.` or `:`.
pub const HEADER_KEYWORDS: [&str; 10] = [
    "question",
    "questions",
    "s.no",
    "sno",
    "sr.no",
    "serial",
    "serial no",
    "serial number",
    "row number",
    "row no",
];

const FENCE: &str = "```";

pub(super) fn parse(text: &str) -> Option<Dataset> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(FENCE))
        .skip_while(|line| !line.contains(DELIMITER) || is_alignment_row(line))
        .peekable();

    let first = *lines.peek()?;
    let framing = Framing::of(first);
    let first_fields = framing.split(first)?;

    let has_header = is_header(&first_fields);
    let header = if has_header {
        lines.next();
        header_columns(first_fields)
    } else {
        STANDARD_COLUMNS.iter().map(|c| c.to_string()).collect()
    };

    let mut after_header = has_header;
    let mut rows = Dataset::new();
    for line in lines {
        let separator = is_alignment_row(line) || (after_header && is_rule(line));
        after_header = false;
        if separator {
            continue;
        }
        if let Some(fields) = framing.split(line) {
            rows.push(zip_row(&header, fields));
        }
    }

    (!rows.is_empty()).then_some(rows)
}

/// Whether the table's lines carry a leading and/or trailing `|`.
///
/// Decided once from the first delimited line, so a data row whose first
/// cell is empty keeps its position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Framing {
    leading: bool,
    trailing: bool,
}

impl Framing {
    fn of(line: &str) -> Framing {
        Framing {
            leading: line.starts_with(DELIMITER),
            trailing: line.len() > 1 && line.ends_with(DELIMITER),
        }
    }

    fn split(&self, line: &str) -> Option<Vec<String>> {
        if !line.contains(DELIMITER) {
            return None;
        }
        let mut inner = line;
        if self.leading {
            inner = inner.strip_prefix(DELIMITER).unwrap_or(inner);
        }
        if self.trailing {
            inner = inner.strip_suffix(DELIMITER).unwrap_or(inner);
        }
        Some(inner.split(DELIMITER).map(|f| f.trim().to_string()).collect())
    }
}

fn header_token(cell: &str) -> String {
    let compact: String = cell
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    compact.trim_end_matches(['.', ':']).to_string()
}

fn is_header(fields: &[String]) -> bool {
    fields.iter().any(|field| {
        let token = header_token(field);
        !token.is_empty() && HEADER_KEYWORDS.iter().any(|keyword| header_token(keyword) == token)
    })
}

/// Markdown alignment row: every cell is `---`, `:---`, `---:` or `:---:`.
fn is_alignment_row(line: &str) -> bool {
    let cells: Vec<&str> = line
        .trim_matches(DELIMITER)
        .split(DELIMITER)
        .map(str::trim)
        .collect();
    line.contains(DELIMITER)
        && cells.iter().all(|cell| {
            let dashes = cell.strip_prefix(':').unwrap_or(cell);
            let dashes = dashes.strip_suffix(':').unwrap_or(dashes);
            dashes.len() >= 3 && dashes.chars().all(|c| c == '-')
        })
}

/// Looser separator shape (`|-|-|`), only honoured right below a header.
fn is_rule(line: &str) -> bool {
    line.contains('-') && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Header names, with blanks and duplicates renamed so no column is lost.
fn header_columns(fields: Vec<String>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for (idx, name) in fields.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Column {}", idx + 1)
        } else {
            name
        };
        let mut unique = base.clone();
        let mut n = 2;
        while columns.contains(&unique) {
            unique = format!("{base} ({n})");
            n += 1;
        }
        columns.push(unique);
    }
    columns
}

fn zip_row(header: &[String], fields: Vec<String>) -> Record {
    let mut fields = fields.into_iter();
    header
        .iter()
        .map(|column| (column.clone(), fields.next().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line: &str) -> Vec<String> {
        Framing::of(line).split(line).unwrap_or_default()
    }

    #[test]
    fn header_needs_a_keyword_cell() {
        assert!(is_header(&fields("S.No | Question")));
        assert!(is_header(&fields("| Row Number | Name |")));
        assert!(is_header(&fields("S. No. | Item")));
        assert!(!is_header(&fields("1 | Paris | France")));
        assert!(!is_header(&fields("1 | Snowfall in winter? | Easy")));
        assert!(!is_header(&fields("2 | Which question is hardest? | B")));
    }

    #[test]
    fn alignment_rows_need_three_dashes_per_cell() {
        assert!(is_alignment_row("|---|:---:|"));
        assert!(is_alignment_row("--- | ---:"));
        assert!(!is_alignment_row("| - | - |"));
        assert!(!is_alignment_row("1 | - | x"));
        assert!(is_rule("|-|-|"));
    }

    #[test]
    fn framing_is_decided_by_the_first_line() {
        let framed = Framing::of("| S.No | Question |");
        assert_eq!(framed.split("| 1 | What? |"), Some(vec!["1".to_string(), "What?".to_string()]));

        let bare = Framing::of("S.No | Question");
        assert_eq!(
            bare.split("| What? "),
            Some(vec![String::new(), "What?".to_string()])
        );
        assert_eq!(bare.split("no delimiter"), None);
    }

    #[test]
    fn blank_and_duplicate_header_names_are_kept_apart() {
        assert_eq!(
            header_columns(fields("Question | | Question")),
            vec!["Question", "Column 2", "Question (2)"]
        );
    }
}
