//! # Graph Command Parsing
//!
//! File: cli/src/delegation/graph/parse.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns a free-form graph command into a `GraphSpec`:
//!
//! ```text
//! create a bar chart titled "Rainfall" with data jan:80 feb:62 mar:51 ylabel 'mm'
//! create line graph with data 1,2 2,4 3,9 title "Squares" xlabel "n" ylabel "n^2"
//! create pie chart with data 10, 20, 30
//! ```
//!
//! - Kind: `line`, `bar` or `pie`, followed by `graph`, `chart` or `plot`.
//! - Data: everything after `with data`, minus any label segments.
//! - Points are separated by whitespace or `;`. Each point is `x,y`,
//!   `label:value`, or a bare value whose x is its 1-based position. A token
//!   with two or more commas (`10,20,30`) is a list of bare values.
//! - Labels: `title`/`titled`, `xlabel`/`x label`/`x-axis`,
//!   `ylabel`/`y label`/`y-axis`, followed by a quoted string. They may appear
//!   anywhere in the command.
//!
use crate::core::error::ChatbotError;
use regex::{Captures, Regex};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(line|bar|pie)\s+(?:graph|chart|plot)\b").expect("kind pattern is valid")
});

static DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bwith\s+data\b[\s:]*(.*)$").expect("data pattern is valid")
});

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(titled|title|x[\s_-]?label|x[\s-]?axis|y[\s_-]?label|y[\s-]?axis)\s*[=:]?\s*(?:"([^"]*)"|'([^']*)')"#,
    )
    .expect("label pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Line,
    Bar,
    Pie,
}

impl GraphKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Line => "line",
            GraphKind::Bar => "bar",
            GraphKind::Pie => "pie",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphKind {
    type Err = ChatbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(GraphKind::Line),
            "bar" => Ok(GraphKind::Bar),
            "pie" => Ok(GraphKind::Pie),
            other => Err(ChatbotError::Graph(format!(
                "unknown graph kind '{}' (expected line, bar or pie)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphSpec {
    pub kind: GraphKind,
    pub points: Vec<DataPoint>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

/// Parses a complete graph command.
pub fn parse_command(command: &str) -> Result<GraphSpec, ChatbotError> {
    let kind = KIND
        .captures(command)
        .ok_or_else(|| {
            ChatbotError::Graph("say which kind of graph to create: line, bar or pie".to_string())
        })?[1]
        .parse::<GraphKind>()?;

    let data = DATA
        .captures(command)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            ChatbotError::Graph("no data given; add 'with data' followed by values".to_string())
        })?;

    let mut spec = GraphSpec {
        kind,
        points: Vec::new(),
        title: None,
        x_label: None,
        y_label: None,
    };
    for caps in LABEL.captures_iter(command) {
        let value = label_value(&caps);
        let key = caps[1].to_ascii_lowercase();
        let slot = if key.starts_with("title") {
            &mut spec.title
        } else if key.starts_with('x') {
            &mut spec.x_label
        } else {
            &mut spec.y_label
        };
        // The first occurrence wins.
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value);
        }
    }

    let data = LABEL.replace_all(data, " ");
    spec.points = parse_points(&data)?;
    if kind == GraphKind::Pie {
        validate_pie(&spec.points)?;
    }
    Ok(spec)
}

fn label_value(caps: &Captures) -> String {
    caps.get(2)
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Parses the data segment into points.
pub fn parse_points(data: &str) -> Result<Vec<DataPoint>, ChatbotError> {
    let mut points = Vec::new();
    for token in data.split(|c: char| c.is_whitespace() || c == ';') {
        let token = token.trim_matches(|c| c == ',' || c == '(' || c == ')');
        if token.is_empty() || token.eq_ignore_ascii_case("and") {
            continue;
        }
        if let Some((label, value)) = token.split_once(':') {
            if label.is_empty() {
                return Err(ChatbotError::Graph(format!(
                    "'{}' is missing a label before ':'",
                    token
                )));
            }
            points.push(DataPoint {
                label: Some(label.to_string()),
                x: (points.len() + 1) as f64,
                y: parse_number(value)?,
            });
        } else if token.matches(',').count() == 1 {
            let (x, y) = token.split_once(',').unwrap_or((token, ""));
            points.push(DataPoint {
                label: None,
                x: parse_number(x)?,
                y: parse_number(y)?,
            });
        } else {
            // Bare values, possibly a comma list such as `10,20,30`.
            for value in token.split(',').filter(|v| !v.is_empty()) {
                points.push(DataPoint {
                    label: None,
                    x: (points.len() + 1) as f64,
                    y: parse_number(value)?,
                });
            }
        }
    }
    if points.is_empty() {
        return Err(ChatbotError::Graph("no data points were found".to_string()));
    }
    Ok(points)
}

fn parse_number(text: &str) -> Result<f64, ChatbotError> {
    let text = text.trim();
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ChatbotError::Graph(format!("'{}' is not a number", text)))
}

fn validate_pie(points: &[DataPoint]) -> Result<(), ChatbotError> {
    if let Some(point) = points.iter().find(|p| p.y < 0.0) {
        return Err(ChatbotError::Graph(format!(
            "pie charts cannot show negative values ({})",
            point.y
        )));
    }
    if points.iter().map(|p| p.y).sum::<f64>() <= 0.0 {
        return Err(ChatbotError::Graph(
            "pie chart values add up to zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_labels() {
        let spec = parse_command(
            r#"create line graph with data 1,2 2,4 3,9 title "Squares" xlabel 'n' ylabel "n squared""#,
        )
        .unwrap();
        assert_eq!(spec.kind, GraphKind::Line);
        assert_eq!(spec.points.len(), 3);
        assert_eq!(spec.points[2], DataPoint { label: None, x: 3.0, y: 9.0 });
        assert_eq!(spec.title.as_deref(), Some("Squares"));
        assert_eq!(spec.x_label.as_deref(), Some("n"));
        assert_eq!(spec.y_label.as_deref(), Some("n squared"));
    }

    #[test]
    fn title_before_data_and_labelled_points() {
        let spec =
            parse_command(r#"Create a BAR chart titled "Rainfall" with data jan:80 feb:62.5"#)
                .unwrap();
        assert_eq!(spec.kind, GraphKind::Bar);
        assert_eq!(spec.title.as_deref(), Some("Rainfall"));
        assert_eq!(spec.points[0].label.as_deref(), Some("jan"));
        assert_eq!(spec.points[1].x, 2.0);
        assert_eq!(spec.points[1].y, 62.5);
    }

    #[test]
    fn comma_separated_values_are_single_points() {
        let points = parse_points("10, 20, 30 and 40").unwrap();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        assert_eq!(ys, [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(points[3].x, 4.0);
    }

    #[test]
    fn comma_lists_without_spaces_are_bare_values() {
        let spec = parse_command("create pie chart with data 10,20,30").unwrap();
        let ys: Vec<f64> = spec.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, [10.0, 20.0, 30.0]);
        assert_eq!(spec.points[2].x, 3.0);

        let spec = parse_command("create bar chart with data 3,5,2,8").unwrap();
        assert_eq!(spec.points.len(), 4);
        assert_eq!(spec.points[3], DataPoint { label: None, x: 4.0, y: 8.0 });

        // A single comma is still an x,y pair.
        let points = parse_points("1,5 2,7").unwrap();
        assert_eq!(points[1], DataPoint { label: None, x: 2.0, y: 7.0 });
    }

    #[test]
    fn semicolons_and_parentheses_are_accepted() {
        let points = parse_points("(1,5);(2,7)").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].y, 7.0);
    }

    #[test]
    fn rejects_bad_input() {
        let err = parse_command("create line graph please").unwrap_err();
        assert!(err.to_string().contains("with data"));

        let err = parse_command("create graph with data 1 2").unwrap_err();
        assert!(err.to_string().contains("line, bar or pie"));

        let err = parse_command("create bar graph with data 1 two 3").unwrap_err();
        assert!(err.to_string().contains("'two' is not a number"));

        let err = parse_command("create line graph with data title 'x'").unwrap_err();
        assert!(err.to_string().contains("no data points"));
    }

    #[test]
    fn pie_values_must_be_positive() {
        assert!(parse_command("create pie chart with data a:1 b:-2").is_err());
        assert!(parse_command("create pie chart with data 0 0").is_err());
        assert!(parse_command("create pie chart with data a:1 b:0").is_ok());
    }
}
