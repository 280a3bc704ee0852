use super::{FormatError, Result};
use crate::model::{Party, RawTable, RawValue};
use crate::normalizers::{NAME_COLUMN, VOTES_COLUMN};
use itertools::Itertools;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_till};
use nom::character::complete::{char, line_ending};
use nom::combinator::{cut, eof, map, value};
use nom::multi::{many0, separated_list1};
use nom::sequence::{preceded, terminated};
use nom::IResult;

/// Once the opening quote is consumed the field must close; no fallback to a
/// bare field.
fn quoted_field(input: &str) -> IResult<&str, String> {
    map(
        preceded(
            char('"'),
            cut(terminated(
                many0(alt((is_not("\""), value("\"", tag("\"\""))))),
                char('"'),
            )),
        ),
        |parts: Vec<&str>| parts.concat(),
    )(input)
}

fn bare_field(input: &str) -> IResult<&str, String> {
    map(take_till(|c: char| c == ',' || c == '\n' || c == '\r'), |s: &str| {
        s.to_string()
    })(input)
}

fn record(input: &str) -> IResult<&str, Vec<String>> {
    terminated(
        separated_list1(char(','), alt((quoted_field, bare_field))),
        alt((line_ending, eof)),
    )(input)
}

fn is_blank(fields: &[String]) -> bool {
    fields.len() == 1 && fields[0].trim().is_empty()
}

/// Parse CSV text into a raw table. The first non-blank record is the header.
pub fn parse_csv(input: &str) -> Result<RawTable> {
    let mut rest = input.trim_start_matches('\u{feff}');
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut line = 1;

    while !rest.is_empty() {
        let (after, fields) = record(rest).map_err(|e| FormatError::Csv {
            line,
            message: e.to_string(),
        })?;
        line += rest[..rest.len() - after.len()].matches('\n').count();
        rest = after;

        if !is_blank(&fields) {
            records.push(fields);
        }
    }

    let mut records = records.into_iter();
    let headers = match records.next() {
        Some(headers) => headers,
        None => return Ok(RawTable::default()),
    };

    let mut table = RawTable::new(headers);
    for fields in records {
        table.push_row(
            fields
                .into_iter()
                .map(|f| {
                    if f.is_empty() {
                        RawValue::Empty
                    } else {
                        RawValue::Text(f)
                    }
                })
                .collect(),
        );
    }
    Ok(table)
}

fn escape_field(field: &str) -> String {
    if field.contains(|c: char| c == ',' || c == '"' || c == '\n' || c == '\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render `Partido,Votos` CSV, quoting only the fields that need it.
pub fn to_csv(parties: &[Party]) -> String {
    let mut out = format!("{},{}\n", NAME_COLUMN, VOTES_COLUMN);
    let body = parties
        .iter()
        .map(|p| format!("{},{}\n", escape_field(&p.name), p.votes))
        .join("");
    out.push_str(&body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_quoted_fields() {
        let table = parse_csv("Partido,Votos\r\n\"Uno, Dos\",10\n\"Say \"\"hi\"\"\",\n").unwrap();
        assert_eq!(table.headers, vec!["Partido", "Votos"]);
        assert_eq!(
            table.rows,
            vec![
                vec![RawValue::Text("Uno, Dos".into()), RawValue::Text("10".into())],
                vec![RawValue::Text("Say \"hi\"".into()), RawValue::Empty],
            ]
        );
    }

    #[test]
    fn quoted_newlines_and_blank_lines() {
        let table = parse_csv("\u{feff}Partido,Votos\n\n\"A\nB\",1\n\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 0), &RawValue::Text("A\nB".into()));
    }

    #[test]
    fn empty_input_is_empty_table() {
        assert_eq!(parse_csv("").unwrap(), RawTable::default());
    }

    #[test]
    fn junk_after_quote_reports_line() {
        match parse_csv("Partido,Votos\nA,1\n\"B\"x,2\n") {
            Err(FormatError::Csv { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected CSV error, got {:?}", other),
        }
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        match parse_csv("Partido,Votos\n\"abc,5\n") {
            Err(FormatError::Csv { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected CSV error, got {:?}", other),
        }
    }

    #[test]
    fn writes_header_and_escapes() {
        let csv = to_csv(&[Party::new("Plain", 5), Party::new("Comma, Inc", 7)]);
        assert_eq!(csv, "Partido,Votos\nPlain,5\n\"Comma, Inc\",7\n");
    }
}
