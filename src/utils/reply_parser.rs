//! Parsing of free-text model replies.
//!
//! Nothing here assumes the model followed its template. Every function
//! returns something usable for any input, including the empty string.

pub const PLACEHOLDER_QUESTION: &str = "Что вам ближе?";
pub const PLACEHOLDER_OPTIONS: [&str; 2] = [
    "Работа с людьми",
    "Работа с техникой и данными",
];

const QUESTION_LABELS: [&str; 2] = ["Question:", "Вопрос:"];
const OPTION_LABELS: [&str; 2] = ["1.", "2."];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub question: String,
    pub options: Vec<String>,
}

/// Splits a `Question: ... / 1. ... / 2. ...` reply into its parts.
///
/// The first non-empty line is the question. Later lines starting with
/// `1.` or `2.` are options; at most two are kept. With fewer than two
/// options the placeholder pair is returned instead.
pub fn parse_question_reply(reply: &str) -> ParsedQuestion {
    let mut lines = reply.lines().map(str::trim).filter(|l| !l.is_empty());

    let question = lines
        .next()
        .map(strip_question_label)
        .filter(|q| !q.is_empty())
        .unwrap_or(PLACEHOLDER_QUESTION)
        .to_string();

    let mut options: Vec<String> = lines
        .filter_map(strip_option_label)
        .filter(|o| !o.is_empty())
        .take(2)
        .map(str::to_string)
        .collect();

    if options.len() < 2 {
        options = PLACEHOLDER_OPTIONS.iter().map(|o| o.to_string()).collect();
    }

    ParsedQuestion { question, options }
}

fn strip_question_label(line: &str) -> &str {
    QUESTION_LABELS
        .iter()
        .find_map(|label| line.strip_prefix(label))
        .unwrap_or(line)
        .trim()
}

fn strip_option_label(line: &str) -> Option<&str> {
    OPTION_LABELS
        .iter()
        .find_map(|label| line.strip_prefix(label))
        .map(str::trim)
}

/// Recovers a bare profession name from a `Profession: X. Because Y.` reply.
///
/// Only the first non-empty line is considered. Keeps the text after the
/// first `:` (if any), then the text before the first `.` (if any).
pub fn normalize_profession_label(label: &str) -> String {
    let label = label
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let after_colon = match label.split_once(':') {
        Some((_, rest)) => rest,
        None => label,
    };
    let before_period = match after_colon.split_once('.') {
        Some((head, _)) => head,
        None => after_colon,
    };
    before_period.trim().to_string()
}

/// Extracts profession names from numbered `N. **Name** - X%` lines.
pub fn parse_profession_list(reply: &str) -> Vec<String> {
    reply
        .lines()
        .filter_map(|line| {
            let line = line.trim_start();
            let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits == 0 {
                return None;
            }
            let rest = line[digits..].strip_prefix('.')?.trim_start();
            let rest = rest.strip_prefix("**")?;
            let (name, _) = rest.split_once("**")?;
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}
